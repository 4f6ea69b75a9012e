use super::traits::{ClassChartsClient, Login};
use crate::error::{Error, Result};
use crate::interfaces::rewards::{self, RewardPurchaseResponse, RewardsResponse};
use crate::interfaces::student_code::{self, StudentCodeResponse};
use crate::session::{ClientConfig, Role, Session};
use async_trait::async_trait;
use chrono::NaiveDate;
use log::info;

/// Client for a student account, logging in with the student code and
/// date of birth.
#[derive(Debug)]
pub struct StudentClient {
    session: Session,
    student_code: String,
    /// `DD/MM/YYYY`, sent as is.
    date_of_birth: String,
}

impl StudentClient {
    pub fn new(student_code: impl Into<String>, date_of_birth: impl Into<String>) -> Result<Self> {
        Self::with_config(student_code, date_of_birth, ClientConfig::default())
    }

    pub fn with_config(
        student_code: impl Into<String>,
        date_of_birth: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            session: Session::new(Role::Student, config)?,
            student_code: student_code.into(),
            date_of_birth: date_of_birth.into(),
        })
    }

    /// Items in the student's rewards shop.
    pub async fn get_rewards(&mut self) -> Result<RewardsResponse> {
        rewards::from_req(&mut self.session).await
    }

    /// Buy an item from the rewards shop. The response holds the new balance.
    pub async fn purchase_reward(&mut self, item_id: i64) -> Result<RewardPurchaseResponse> {
        rewards::purchase(&mut self.session, item_id).await
    }

    /// Look up the student's login code.
    pub async fn get_student_code(
        &mut self,
        date_of_birth: NaiveDate,
    ) -> Result<StudentCodeResponse> {
        student_code::from_req(&mut self.session, date_of_birth).await
    }
}

#[async_trait]
impl Login for StudentClient {
    async fn login(&mut self) -> Result<()> {
        if self.student_code.is_empty() {
            return Err(Error::validation("Student Code not provided"));
        }

        let code = self.student_code.to_uppercase();
        let form = [
            ("_method", "POST"),
            ("code", code.as_str()),
            ("dob", self.date_of_birth.as_str()),
            ("remember_me", "1"),
            ("recaptcha-token", "no-token-available"),
        ];
        let cookies = self.session.login_handshake(&form).await?;

        // The student API wants the login cookies on every later request.
        self.session
            .set_cookies(cookies.split(',').map(str::to_string).collect());
        self.session.adopt_login_cookies(&cookies)?;

        // The session id from the cookie only becomes usable after a ping.
        self.session.revalidate().await?;
        let user = self.get_student_info().await?.data.user;
        self.session.set_subject_id(user.id);

        info!("Logged in as student {} ({})", user.name, user.id);
        Ok(())
    }
}

impl ClassChartsClient for StudentClient {
    fn session(&self) -> &Session {
        &self.session
    }

    fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
