use super::traits::{ClassChartsClient, Login};
use crate::error::{Error, Result};
use crate::interfaces::password::{self, ChangePasswordResponse};
use crate::interfaces::pupils::{self, Pupil};
use crate::session::{ClientConfig, Role, Session};
use async_trait::async_trait;
use log::info;
use std::fmt;

/// Client for a parent account.
///
/// A parent sees one or more pupils. Login selects the first one, use
/// [`ParentClient::select_pupil`] to switch.
pub struct ParentClient {
    session: Session,
    email: String,
    password: String,
    /// Pupils found at login time.
    pupils: Vec<Pupil>,
}

impl fmt::Debug for ParentClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParentClient")
            .field("email", &self.email)
            .field("pupils", &self.pupils.len())
            .field("subject_id", &self.session.subject_id())
            .finish_non_exhaustive()
    }
}

impl ParentClient {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self> {
        Self::with_config(email, password, ClientConfig::default())
    }

    pub fn with_config(
        email: impl Into<String>,
        password: impl Into<String>,
        config: ClientConfig,
    ) -> Result<Self> {
        Ok(Self {
            session: Session::new(Role::Parent, config)?,
            email: email.into(),
            password: password.into(),
            pupils: vec![],
        })
    }

    /// The pupils retained at login.
    pub fn pupils(&self) -> &[Pupil] {
        &self.pupils
    }

    /// Ask the server for the pupils attached to this account.
    pub async fn get_pupils(&mut self) -> Result<Vec<Pupil>> {
        Ok(pupils::from_req(&mut self.session).await?.data)
    }

    /// Make requests for another pupil found at login.
    pub fn select_pupil(&mut self, pupil_id: i64) -> Result<()> {
        if pupil_id == 0 {
            return Err(Error::validation("No pupil ID specified"));
        }

        let pupil = self
            .pupils
            .iter()
            .find(|pupil| pupil.id() == pupil_id)
            .ok_or_else(|| Error::validation("No pupil with specified ID found"))?;

        info!("Selected pupil {} ({})", pupil.name(), pupil.id());
        self.session.set_subject_id(pupil_id);
        Ok(())
    }

    pub async fn change_password(
        &mut self,
        current_password: &str,
        new_password: &str,
    ) -> Result<ChangePasswordResponse> {
        password::change(&mut self.session, current_password, new_password).await
    }
}

#[async_trait]
impl Login for ParentClient {
    async fn login(&mut self) -> Result<()> {
        if self.email.is_empty() {
            return Err(Error::validation("Email not provided"));
        }
        if self.password.is_empty() {
            return Err(Error::validation("Password not provided"));
        }

        let form = [
            ("_method", "POST"),
            ("email", self.email.as_str()),
            ("logintype", "existing"),
            ("password", self.password.as_str()),
            ("recaptcha-token", "no-token-available"),
        ];
        let cookies = self.session.login_handshake(&form).await?;
        self.session.adopt_login_cookies(&cookies)?;

        let pupils = self.get_pupils().await?;
        let first = pupils
            .first()
            .ok_or_else(|| Error::validation("Account has no pupils attached"))?;
        self.session.set_subject_id(first.id());
        self.pupils = pupils;

        info!(
            "Logged in as parent {}, {} pupil(s) attached",
            self.email,
            self.pupils.len()
        );
        Ok(())
    }
}

impl ClassChartsClient for ParentClient {
    fn session(&self) -> &Session {
        &self.session
    }

    fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}
