#[derive(Debug, Clone)]
pub struct Metrics {
    pub upstream_requests: prometheus::IntCounter,
    upstream_errors: prometheus::IntCounterVec,
    pub served_games: prometheus::Gauge,
    pub last_update: prometheus::Gauge,
}

impl Metrics {
    pub fn new(registry: &prometheus::Registry) -> Result<Self, prometheus::Error> {
        let upstream_requests = prometheus::IntCounter::new(
            "upstream_requests",
            "The number of page requests sent to the eShop feed",
        )?;
        registry.register(Box::new(upstream_requests.clone()))?;

        let upstream_errors = prometheus::IntCounterVec::new(
            prometheus::Opts::new(
                "upstream_errors",
                "The number of failed page requests to the eShop feed",
            ),
            &["kind"],
        )?;
        registry.register(Box::new(upstream_errors.clone()))?;

        let served_games = prometheus::Gauge::new(
            "served_games",
            "The number of unique games in the last successful listing",
        )?;
        registry.register(Box::new(served_games.clone()))?;

        let last_update =
            prometheus::Gauge::new("last_updated", "The Unix Timestamp of the last listing")?;
        registry.register(Box::new(last_update.clone()))?;

        Ok(Self {
            upstream_requests,
            upstream_errors,
            served_games,
            last_update,
        })
    }

    pub fn upstream_error(&self, kind: &str) {
        self.upstream_errors.with_label_values(&[kind]).inc();
    }

    pub fn listing_served(&self, games: usize) {
        self.served_games.set(games as f64);

        if let Ok(unix_timestamp) =
            std::time::SystemTime::now().duration_since(std::time::SystemTime::UNIX_EPOCH)
        {
            self.last_update.set(unix_timestamp.as_secs() as f64);
        }
    }

    #[cfg(test)]
    pub fn upstream_errors(&self, kind: &str) -> u64 {
        self.upstream_errors.with_label_values(&[kind]).get()
    }
}
