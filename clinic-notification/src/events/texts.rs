//! Canonical titles and messages for notifications generated from domain
//! events. Kept as plain functions so the exact wording is test-covered.

pub fn medicine_added(name: &str) -> (String, String) {
    (
        "New Medicine Added".to_string(),
        format!("A new medicine \"{name}\" has been added to the inventory."),
    )
}

pub fn medicine_status_changed(name: &str, status: &str) -> (String, String) {
    (
        "Medicine Status Updated".to_string(),
        format!("The medicine \"{name}\" is now {status}."),
    )
}

pub fn medicine_removed(name: &str) -> (String, String) {
    (
        "Medicine Removed".to_string(),
        format!("The medicine \"{name}\" has been removed from the inventory."),
    )
}

pub fn schedule_added(title: &str) -> (String, String) {
    (
        "New Schedule Added".to_string(),
        format!("A new schedule \"{title}\" has been added."),
    )
}

pub fn schedule_status_changed(title: &str, status: &str) -> (String, String) {
    (
        "Schedule Status Updated".to_string(),
        format!("The schedule \"{title}\" is now {status}."),
    )
}

pub fn schedule_removed(title: &str) -> (String, String) {
    (
        "Schedule Removed".to_string(),
        format!("The schedule \"{title}\" has been removed."),
    )
}

pub fn welcome(name: &str) -> (String, String) {
    (
        "Welcome to the Clinic".to_string(),
        format!("Hello {name}, your account has been created."),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn medicine_added_wording() {
        let (title, message) = medicine_added("Aspirin");
        assert_eq!(title, "New Medicine Added");
        assert_eq!(
            message,
            "A new medicine \"Aspirin\" has been added to the inventory."
        );
    }

    #[test]
    fn status_change_wording_includes_status() {
        let (_, message) = medicine_status_changed("Ibuprofen", "out_of_stock");
        assert!(message.contains("\"Ibuprofen\""));
        assert!(message.contains("out_of_stock"));
    }

    #[test]
    fn welcome_addresses_user_by_name() {
        let (title, message) = welcome("Jane");
        assert_eq!(title, "Welcome to the Clinic");
        assert!(message.starts_with("Hello Jane"));
    }
}
