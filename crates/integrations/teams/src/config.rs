use std::time::Duration;

/// Strategy used to compute the delay before each webhook retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryStrategy {
    /// Delay doubles after every attempt, starting at `base` and never
    /// exceeding `max`.
    Exponential { base: Duration, max: Duration },
    /// Delay grows by `step` per attempt, capped at `max`.
    Linear { step: Duration, max: Duration },
    /// The same delay before every retry.
    Constant { delay: Duration },
}

impl Default for RetryStrategy {
    fn default() -> Self {
        Self::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_secs(2),
        }
    }
}

impl RetryStrategy {
    /// Delay before retry number `attempt` (zero-based).
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match *self {
            Self::Exponential { base, max } => {
                let factor = 2u32.saturating_pow(attempt);
                base.saturating_mul(factor).min(max)
            }
            Self::Linear { step, max } => step.saturating_mul(attempt.saturating_add(1)).min(max),
            Self::Constant { delay } => delay,
        }
    }
}

/// Retry behaviour of the webhook client.
///
/// # Examples
///
/// ```
/// use herald_teams::RetryPolicy;
///
/// let policy = RetryPolicy::default();
/// assert_eq!(policy.max_retries, 10);
/// assert!(policy.host.is_none());
/// ```
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the first attempt; the total number of attempts is
    /// `max_retries + 1`.
    pub max_retries: u32,
    /// Timeout applied to every individual attempt.
    pub timeout: Duration,
    pub strategy: RetryStrategy,
    /// Host to which retries are limited. When `None`, the host of each
    /// request's own URL is used.
    pub host: Option<String>,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 10,
            timeout: Duration::from_secs(2),
            strategy: RetryStrategy::default(),
            host: None,
        }
    }
}

impl RetryPolicy {
    #[must_use]
    pub fn with_max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub fn with_strategy(mut self, strategy: RetryStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Restrict retries to a single host.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Number of retries allowed for a request to `url`.
    pub fn retries_for(&self, url: &reqwest::Url) -> u32 {
        match (&self.host, url.host_str()) {
            (None, _) => self.max_retries,
            (Some(scope), Some(host)) if scope.eq_ignore_ascii_case(host) => self.max_retries,
            _ => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy_values() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries, 10);
        assert_eq!(policy.timeout, Duration::from_secs(2));
        assert_eq!(
            policy.strategy,
            RetryStrategy::Exponential {
                base: Duration::from_millis(100),
                max: Duration::from_secs(2),
            }
        );
    }

    #[test]
    fn exponential_doubles_and_caps() {
        let strategy = RetryStrategy::default();
        assert_eq!(strategy.delay_for(0), Duration::from_millis(100));
        assert_eq!(strategy.delay_for(1), Duration::from_millis(200));
        assert_eq!(strategy.delay_for(3), Duration::from_millis(800));
        assert_eq!(strategy.delay_for(5), Duration::from_secs(2));
        assert_eq!(strategy.delay_for(40), Duration::from_secs(2));
    }

    #[test]
    fn linear_and_constant() {
        let linear = RetryStrategy::Linear {
            step: Duration::from_millis(50),
            max: Duration::from_millis(120),
        };
        assert_eq!(linear.delay_for(0), Duration::from_millis(50));
        assert_eq!(linear.delay_for(1), Duration::from_millis(100));
        assert_eq!(linear.delay_for(2), Duration::from_millis(120));

        let constant = RetryStrategy::Constant {
            delay: Duration::from_millis(7),
        };
        assert_eq!(constant.delay_for(9), Duration::from_millis(7));
    }

    #[test]
    fn retries_scoped_to_host() {
        let url = reqwest::Url::parse("https://example.webhook.office.com/hook").unwrap();
        let unscoped = RetryPolicy::default().with_max_retries(4);
        assert_eq!(unscoped.retries_for(&url), 4);

        let scoped = unscoped.clone().with_host("EXAMPLE.webhook.office.com");
        assert_eq!(scoped.retries_for(&url), 4);

        let other = unscoped.with_host("outlook.office.com");
        assert_eq!(other.retries_for(&url), 0);
    }
}
