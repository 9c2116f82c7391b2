use once_cell::sync::Lazy;
use regex::Regex;

use crate::errors::StorageError;

static DOCKER_REPO_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:[._-][a-z0-9]+)*$").expect("valid image name regex"));

static LOCAL_NAME_PART: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z0-9\-_]*$").expect("valid local name regex"));

/// Docker repository-name grammar.
pub fn conforms_to_docker_rules(name: &str) -> Result<(), StorageError> {
    if DOCKER_REPO_NAME.is_match(name) {
        Ok(())
    } else {
        Err(StorageError::bad_request(&format!(
            "Image name '{name}' does not conform to docker image name rules: [a-z0-9]+(?:[._-][a-z0-9]+)*"
        )))
    }
}

/// Docker rules, plus no periods: periods separate namespaces within a realm.
pub fn validate_image_name(name: &str) -> Result<(), StorageError> {
    conforms_to_docker_rules(name)?;
    if name.contains('.') {
        return Err(StorageError::bad_request(&format!(
            "periods are not allowed in image names: {name}"
        )));
    }
    Ok(())
}

/// `NAME[:TAG]` as used for images held by the local engine.
pub fn local_image_name_is_valid(name: &str) -> bool {
    let parts: Vec<&str> = name.split(':').collect();
    parts.len() <= 2 && parts.iter().all(|part| LOCAL_NAME_PART.is_match(part))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docker_rules() {
        assert!(conforms_to_docker_rules("web-app_2").is_ok());
        assert!(conforms_to_docker_rules("a.b").is_ok());
        assert!(conforms_to_docker_rules("Web").is_err());
        assert!(conforms_to_docker_rules("-lead").is_err());
        assert!(conforms_to_docker_rules("trail-").is_err());
        assert!(conforms_to_docker_rules("").is_err());
    }

    #[test]
    fn periods_are_rejected_for_stored_images() {
        assert!(validate_image_name("scanner").is_ok());
        assert!(validate_image_name("acme.scanner").is_err());
    }

    #[test]
    fn local_names_allow_one_tag() {
        assert!(local_image_name_is_valid("myimage"));
        assert!(local_image_name_is_valid("my_image:v1-2"));
        assert!(!local_image_name_is_valid("a:b:c"));
        assert!(!local_image_name_is_valid("bad/name"));
    }
}
