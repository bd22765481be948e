//! A history pinned to one location, used when rendering on the server.

use crate::history::location::Location;
use crate::history::{History, HistoryError, HistoryEvent, NavigateOptions};
use crate::store::Subscription;

#[derive(Debug, Clone)]
pub struct StaticHistory {
    location: Location,
}

impl StaticHistory {
    pub fn new(uri: &str) -> Self {
        Self {
            location: Location::from_uri(uri),
        }
    }
}

impl History for StaticHistory {
    fn location(&self) -> Location {
        self.location.clone()
    }

    fn listen(&self, _listener: Box<dyn Fn(&HistoryEvent) + Send + Sync>) -> Subscription {
        // The location never changes
        Subscription::inert()
    }

    fn navigate(&self, to: &str, _options: NavigateOptions) -> Result<(), HistoryError> {
        tracing::warn!(to, pathname = %self.location.pathname, "navigation on a static history");
        Err(HistoryError::ReadOnly(to.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_is_fixed() {
        let history = StaticHistory::new("/blog/hello?ref=feed");
        assert_eq!(history.location().pathname, "/blog/hello");
        assert_eq!(history.location().search, "ref=feed");

        let _sub = history.listen(Box::new(|_: &HistoryEvent| panic!("static history never fires")));
        let err = history.navigate("/about", NavigateOptions::default()).unwrap_err();
        assert_eq!(err, HistoryError::ReadOnly("/about".into()));
        assert_eq!(history.location().pathname, "/blog/hello");
    }
}
