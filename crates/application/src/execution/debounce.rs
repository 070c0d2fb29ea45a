//! Cancellable debounce timer.

use std::time::Duration;

use tokio::time::Instant;

/// A restartable deadline. Each `touch` pushes the deadline out by the
/// window; `elapsed` resolves once per quiet window.
#[derive(Debug, Clone)]
pub struct DebounceTimer {
    window: Duration,
    deadline: Option<Instant>,
}

impl DebounceTimer {
    /// Creates a disarmed timer.
    #[must_use]
    pub const fn new(window: Duration) -> Self {
        Self {
            window,
            deadline: None,
        }
    }

    /// The quiet window.
    #[must_use]
    pub const fn window(&self) -> Duration {
        self.window
    }

    /// Arms the timer, restarting the window.
    pub fn touch(&mut self) {
        self.deadline = Some(Instant::now() + self.window);
    }

    /// Disarms the timer.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns true if a fire is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    /// Resolves when the window passes without a `touch`, then disarms.
    ///
    /// Pending forever while disarmed. Cancel-safe: dropping the future
    /// leaves the deadline in place.
    pub async fn elapsed(&mut self) {
        match self.deadline {
            Some(deadline) => {
                tokio::time::sleep_until(deadline).await;
                self.deadline = None;
            }
            None => std::future::pending().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_burst_collapses_to_one_fire() {
        let mut timer = DebounceTimer::new(Duration::from_millis(500));
        let start = Instant::now();
        for _ in 0..5 {
            timer.touch();
            tokio::time::advance(Duration::from_millis(100)).await;
        }
        timer.elapsed().await;
        assert_eq!(Instant::now() - start, Duration::from_millis(900));
        assert!(!timer.is_armed());

        let again = tokio::time::timeout(Duration::from_secs(5), timer.elapsed()).await;
        assert!(again.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_prevents_fire() {
        let mut timer = DebounceTimer::new(Duration::from_millis(50));
        timer.touch();
        timer.cancel();
        let fired = tokio::time::timeout(Duration::from_secs(1), timer.elapsed()).await;
        assert!(fired.is_err());
    }
}
