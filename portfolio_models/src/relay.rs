//! Identifiers that select the account, template and client key used when
//! handing a message to the relay service.

use crate::macros::nutype_string;

nutype_string!(RelayServiceId(
    sanitize(trim),
    validate(not_empty, len_char_max = 256)
));

nutype_string!(RelayTemplateId(
    sanitize(trim),
    validate(not_empty, len_char_max = 256)
));

nutype_string!(RelayPublicKey(
    sanitize(trim),
    validate(not_empty, len_char_max = 256)
));

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_identifiers() {
        let id = RelayServiceId::try_new("  service_inpj4ma ").unwrap();
        assert_eq!(*id, "service_inpj4ma");
    }

    #[test]
    fn rejects_blank_identifiers() {
        assert!(RelayTemplateId::try_new("   ").is_err());
        assert!(RelayPublicKey::try_new("").is_err());
    }

    #[test]
    fn deserialize_validates() {
        let ok = serde_json::from_str::<RelayPublicKey>(r#""SX9NS0uUz82EP_p8p""#);
        assert_eq!(ok.unwrap().into_inner(), "SX9NS0uUz82EP_p8p");

        let err = serde_json::from_str::<RelayPublicKey>(r#""""#);
        assert!(err.is_err());
    }
}
