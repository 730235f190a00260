//! Query timing and connection pool gauges.
//!
//! Repositories time each statement with a [`QueryTimer`]; the health
//! endpoint samples the pool gauges through [`record_pool_metrics`].

use metrics::{gauge, histogram};
use sqlx::PgPool;
use std::time::Instant;

/// Times one database statement.
///
/// Create the timer before running the statement and call
/// [`record`](QueryTimer::record) once it resolves. The elapsed time lands
/// in the `database_query_duration_seconds` histogram, labelled with the
/// statement name.
pub struct QueryTimer {
    query_name: String,
    started: Instant,
}

impl QueryTimer {
    pub fn new(query_name: impl Into<String>) -> Self {
        Self {
            query_name: query_name.into(),
            started: Instant::now(),
        }
    }

    /// Report the elapsed time and consume the timer.
    pub fn record(self) {
        histogram!(
            "database_query_duration_seconds",
            "query" => self.query_name
        )
        .record(self.started.elapsed().as_secs_f64());
    }
}

/// Export the pool's connection counts as gauges.
pub fn record_pool_metrics(pool: &PgPool) {
    let total = pool.size() as usize;
    let idle = pool.num_idle();

    gauge!("database_connections_total").set(total as f64);
    gauge!("database_connections_idle").set(idle as f64);
    gauge!("database_connections_active").set(total.saturating_sub(idle) as f64);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_timer_holds_name() {
        let timer = QueryTimer::new("list_assets");
        assert_eq!(timer.query_name, "list_assets");
    }

    #[test]
    fn test_query_timer_from_owned_string() {
        let name = String::from("count_people");
        let timer = QueryTimer::new(name);
        assert_eq!(timer.query_name, "count_people");
    }
}
