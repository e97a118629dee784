use serde::Deserialize;

use crate::product::types::{Check, Lifecycle};
use crate::product::validation::Validator;

pub struct DateValidator {
    pub release_floor: i64,
}

impl Validator for DateValidator {
    fn check(&self) -> Check {
        Check::Dates
    }

    fn validate(&self, record: &serde_json::Value) -> Result<(), String> {
        let lifecycle = Lifecycle::deserialize(record).map_err(|error| error.to_string())?;
        validate_dates(&lifecycle, self.release_floor)
    }
}

/// Release must follow the floor; end of sale and end of support, when
/// present, follow the release and each other. At least one must be present.
fn validate_dates(lifecycle: &Lifecycle, release_floor: i64) -> Result<(), String> {
    let Lifecycle {
        release,
        endofsale,
        endofsupport,
    } = *lifecycle;

    if release <= release_floor {
        return Err(format!(
            "release {} is not after {}",
            release, release_floor
        ));
    }

    match (endofsale, endofsupport) {
        (None, None) => Err("neither endofsale nor endofsupport is set".to_string()),
        (Some(sale), _) if sale <= release => Err(format!(
            "endofsale {} is not after release {}",
            sale, release
        )),
        (_, Some(support)) if support <= release => Err(format!(
            "endofsupport {} is not after release {}",
            support, release
        )),
        (Some(sale), Some(support)) if support <= sale => Err(format!(
            "endofsupport {} is not after endofsale {}",
            support, sale
        )),
        _ => Ok(()),
    }
}
