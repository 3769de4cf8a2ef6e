use reqwest::Method;

/// Past-tense verb used in the success notification for a request method
pub fn action_for_method(method: &Method) -> &'static str {
    match *method {
        Method::POST => "created",
        Method::PUT | Method::PATCH => "updated",
        Method::DELETE => "deleted",
        _ => "performed",
    }
}

/// Message of the success notification for a request method
pub(crate) fn success_message(method: &Method) -> String {
    format!("Task successfully {}", action_for_method(method))
}
