//! Apply locally, reconcile on response, revert on error

use std::future::Future;
use tracing::warn;

/// A locally held value updated ahead of the server
#[derive(Debug, Clone, PartialEq)]
pub struct Optimistic<T> {
    value: T,
}

impl<T: Clone> Optimistic<T> {
    pub fn new(value: T) -> Self {
        Self { value }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Show `next` immediately, then run `request`
    ///
    /// On success the new value stays; on error the previous value is
    /// restored and the error returned. `on_change` observes every value the
    /// UI would render, in order.
    pub async fn apply<E, Fut, F>(
        &mut self,
        next: T,
        mut on_change: F,
        request: Fut,
    ) -> Result<(), E>
    where
        Fut: Future<Output = Result<(), E>>,
        F: FnMut(&T),
    {
        let previous = std::mem::replace(&mut self.value, next);
        on_change(&self.value);

        match request.await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!("optimistic update rejected, reverting");
                self.value = previous;
                on_change(&self.value);
                Err(e)
            }
        }
    }

    pub fn into_inner(self) -> T {
        self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_success_keeps_new_value() {
        let mut state = Optimistic::new(false);
        let mut seen = vec![];
        let result: Result<(), String> = state
            .apply(true, |v| seen.push(*v), async { Ok(()) })
            .await;
        assert!(result.is_ok());
        assert!(*state.get());
        assert_eq!(seen, vec![true]);
    }

    #[tokio::test]
    async fn test_failure_reverts() {
        let mut state = Optimistic::new("active".to_string());
        let mut seen = vec![];
        let result = state
            .apply(
                "inactive".to_string(),
                |v| seen.push(v.clone()),
                async { Err::<(), _>("server down") },
            )
            .await;
        assert_eq!(result, Err("server down"));
        assert_eq!(state.into_inner(), "active");
        assert_eq!(seen, vec!["inactive".to_string(), "active".to_string()]);
    }
}
