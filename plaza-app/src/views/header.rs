use crate::dispatch::{Dispatch, Outcome, Request, Response};
use plaza_common::{
    load::{LoadToken, TokenSource},
    session::Session,
};
use tracing::{debug, error, info};

/// Login bar. Owns the typed name and the pending lookup; the identity itself lives in the
/// [`Session`] owned by the shell.
#[derive(Clone, Eq, PartialEq, Debug, Default, Hash)]
pub struct Header {
    username: String,
    pending: Option<LoadToken>,
}

impl Header {
    #[must_use]
    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn login(&mut self, name: &str, tokens: &mut TokenSource) -> Option<Dispatch> {
        let name = name.trim();
        if name.is_empty() {
            debug!("Ignoring login without a name");
            return None;
        }

        name.clone_into(&mut self.username);
        let token = tokens.next_token();
        self.pending = Some(token);

        Some(Dispatch {
            token,
            request: Request::UsersByName(name.to_owned()),
        })
    }

    pub fn logout(&mut self, session: &mut Session) {
        if let Some(identity) = session.logout() {
            info!(user_id = %identity.user_id(), "Logged out");
        }
        self.username.clear();
        self.pending = None;
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        self.pending == Some(outcome.token)
    }

    pub fn apply(&mut self, outcome: Outcome, session: &mut Session) -> bool {
        if !self.owns(&outcome) {
            return false;
        }
        self.pending = None;

        match outcome.response {
            Response::Users(Ok(users)) => {
                let Some(user) = users.into_iter().next() else {
                    error!(username = %self.username, "User not found");
                    return false;
                };
                let identity = session.login(user);
                info!(
                    user_id = %identity.user_id(),
                    name = %identity.user().name,
                    "Logged in"
                );
                true
            }
            Response::Users(Err(err)) => {
                error!(error = %err, "Error fetching user data");
                false
            }
            _ => false,
        }
    }
}
