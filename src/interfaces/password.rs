//! Changing the parent account's password.
//! URL: {parent_api_base}/password

use super::response::{ApiResponse, EmptyMeta};
use crate::error::Result;
use crate::session::{ApiRequest, Session};

pub type ChangePasswordResponse = ApiResponse<EmptyMeta, EmptyMeta>;

pub(crate) async fn change(
    session: &mut Session,
    current_password: &str,
    new_password: &str,
) -> Result<ChangePasswordResponse> {
    let request = ApiRequest::post("/password").form([
        ("current", current_password),
        ("new", new_password),
        ("repeat", new_password),
    ]);
    session.request(request).await
}
