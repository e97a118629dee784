use scraper::Html;

use crate::fetch::Fetcher;
use crate::product::patterns::Patterns;
use crate::product::types::Check;
use crate::product::validation::Validator;

pub struct ModelValidator<'a, F> {
    pub patterns: &'a Patterns,
    pub fetcher: &'a F,
}

impl<'a, F: Fetcher> Validator for ModelValidator<'a, F> {
    fn check(&self) -> Check {
        Check::Model
    }

    fn validate(&self, record: &serde_json::Value) -> Result<(), String> {
        let model = field(record, "model")?;
        let url = field(record, "url")?;

        let page = self.fetcher.fetch(url).map_err(|error| error.to_string())?;
        if !page.is_success() {
            return Err(format!("`{}` answered with status {}", url, page.status));
        }

        let heading = first_heading(&page.body, self.patterns)
            .ok_or_else(|| format!("`{}` has no heading", url))?;

        match heading.contains(model) {
            true => Ok(()),
            false => Err(format!(
                "model {:?} does not appear in heading {:?}",
                model, heading
            )),
        }
    }
}

fn field<'r>(record: &'r serde_json::Value, name: &str) -> Result<&'r str, String> {
    record
        .get(name)
        .and_then(serde_json::Value::as_str)
        .ok_or_else(|| format!("{} is missing or not a string", name))
}

fn first_heading(body: &str, patterns: &Patterns) -> Option<String> {
    let document = Html::parse_document(body);
    document
        .select(&patterns.heading)
        .next()
        .map(|heading| heading.text().collect::<String>())
}
