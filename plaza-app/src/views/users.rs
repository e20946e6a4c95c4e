use crate::dispatch::{Dispatch, Outcome, Request, Response};
use plaza_common::{
    filter::{Filter, NameFilter},
    load::{Resource, Settled, TokenSource},
    model::{
        Id,
        user::{User, UserMarker},
    },
};
use tracing::{debug, info};

#[derive(Clone, Debug)]
pub struct UsersView {
    users: Resource<User>,
    filter: NameFilter,
}

impl UsersView {
    pub fn mount(tokens: &mut TokenSource) -> (Self, Dispatch) {
        let mut users = Resource::new("users");
        let token = users.begin(tokens);

        let view = Self {
            users,
            filter: NameFilter::default(),
        };
        (
            view,
            Dispatch {
                token,
                request: Request::Users,
            },
        )
    }

    #[must_use]
    pub fn resource(&self) -> &Resource<User> {
        &self.users
    }

    #[must_use]
    pub fn filter(&self) -> &NameFilter {
        &self.filter
    }

    #[must_use]
    pub fn visible(&self) -> Vec<&User> {
        self.filter.apply(self.users.items())
    }

    pub fn search(&mut self, query: &str) {
        self.filter = NameFilter::new(query);
    }

    /// Drops a user from the local list only. Nothing is sent to the API.
    pub fn remove(&mut self, user_id: Id<UserMarker>) -> bool {
        let Some(user) = self.users.remove_first(|user| user.id == user_id) else {
            debug!(%user_id, "No such user to remove");
            return false;
        };
        info!(%user_id, name = %user.name, "Removed user from the list");
        true
    }

    #[must_use]
    pub fn owns(&self, outcome: &Outcome) -> bool {
        self.users.owns(outcome.token)
    }

    pub fn apply(&mut self, outcome: Outcome) -> bool {
        match outcome.response {
            Response::Users(result) => self.users.settle(outcome.token, result) != Settled::Stale,
            _ => false,
        }
    }
}
