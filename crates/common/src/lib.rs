//! Shared plumbing for the product catalog crates: wire types and logging setup.

pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_type_ok() {
        let h = types::Health::ok("2026-01-01T00:00:00.000Z".into());
        assert_eq!(h.status, "OK");
        let v = serde_json::to_value(&h).unwrap();
        assert_eq!(v["timeStamp"], "2026-01-01T00:00:00.000Z");
    }
}
