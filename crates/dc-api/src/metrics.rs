//! Prometheus counters exposed on `/metrics`.

use prometheus_client::encoding::text::encode;
use prometheus_client::encoding::EncodeLabelSet;
use prometheus_client::metrics::counter::Counter;
use prometheus_client::metrics::family::Family;
use prometheus_client::registry::Registry;

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct OutcomeLabels {
    pub outcome: String,
}

#[derive(Debug, Clone, Hash, PartialEq, Eq, EncodeLabelSet)]
pub struct LikeLabels {
    pub listing: String,
    pub liked: String,
}

pub struct Metrics {
    registry: Registry,
    bookings: Family<OutcomeLabels, Counter>,
    contact_messages: Family<OutcomeLabels, Counter>,
    likes: Family<LikeLabels, Counter>,
}

impl Metrics {
    pub fn new() -> Self {
        let mut registry = Registry::with_prefix("derm_centre");
        let bookings = Family::<OutcomeLabels, Counter>::default();
        let contact_messages = Family::<OutcomeLabels, Counter>::default();
        let likes = Family::<LikeLabels, Counter>::default();

        registry.register("bookings", "Booking submissions by outcome", bookings.clone());
        registry.register("contact_messages", "Contact form submissions by outcome", contact_messages.clone());
        registry.register("like_toggles", "Like button presses", likes.clone());

        Self { registry, bookings, contact_messages, likes }
    }

    pub fn booking(&self, outcome: &str) {
        self.bookings.get_or_create(&OutcomeLabels { outcome: outcome.into() }).inc();
    }

    pub fn contact(&self, outcome: &str) {
        self.contact_messages.get_or_create(&OutcomeLabels { outcome: outcome.into() }).inc();
    }

    pub fn like(&self, listing: &str, liked: bool) {
        let labels = LikeLabels { listing: listing.into(), liked: liked.to_string() };
        self.likes.get_or_create(&labels).inc();
    }

    /// OpenMetrics text exposition of every registered metric.
    pub fn render(&self) -> Result<String, std::fmt::Error> {
        let mut body = String::new();
        encode(&mut body, &self.registry)?;
        Ok(body)
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counters_show_up_in_exposition() {
        let metrics = Metrics::new();
        metrics.booking("confirmed");
        metrics.booking("confirmed");
        metrics.like("blog", true);
        let text = metrics.render().unwrap();
        assert!(text.contains("derm_centre_bookings_total{outcome=\"confirmed\"} 2"));
        assert!(text.contains("derm_centre_like_toggles_total{listing=\"blog\",liked=\"true\"} 1"));
        assert!(text.ends_with("# EOF\n"));
    }
}
