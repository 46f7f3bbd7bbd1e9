use chrono::Local;
use rand::RngCore;
use rand::rngs::OsRng;

/// Kinds of generated entity identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdKind {
    /// Product id: `P` + `YYYYMM` + 6 random digits, e.g. `P20250300012`.
    Product,
    /// Order id: `O` + `YYYYMMDDHHMM` + 6 random digits.
    Order,
}

/// Produce a fresh identifier for `kind`.
///
/// The random suffix comes from the operating system RNG. Uniqueness is not
/// guaranteed here; the primary key constraint on the owning table is the
/// actual enforcement, and a collision surfaces as a conflict from the write.
pub fn generate(kind: IdKind) -> String {
    let now = Local::now();
    match kind {
        IdKind::Product => format!("P{}{}", now.format("%Y%m"), random_digits(6)),
        IdKind::Order => format!("O{}{}", now.format("%Y%m%d%H%M"), random_digits(6)),
    }
}

fn random_digits(len: usize) -> String {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes.into_iter().map(|b| char::from(b'0' + b % 10)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_id_matches_pattern() {
        let id = generate(IdKind::Product);

        assert_eq!(id.len(), 13);
        assert!(id.starts_with('P'));
        assert!(id[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn order_id_matches_pattern() {
        let id = generate(IdKind::Order);

        assert_eq!(id.len(), 19);
        assert!(id.starts_with('O'));
        assert!(id[1..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn product_id_embeds_current_month() {
        let id = generate(IdKind::Product);
        let expected = Local::now().format("%Y%m").to_string();

        assert_eq!(&id[1..7], expected.as_str());
    }
}
