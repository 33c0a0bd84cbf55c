use base64::prelude::{Engine, BASE64_STANDARD};

// https://datatracker.ietf.org/doc/html/rfc7617
pub fn auth_basic(userid: &str, password: &str) -> String {
    format!(
        "Basic {}",
        BASE64_STANDARD.encode(format!("{userid}:{password}")),
    )
}
