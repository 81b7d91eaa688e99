//! Property tests for validation and ordering

use contact_book::shared::validation::{
    is_valid_email, validate_contact, validate_credentials, MIN_PASSWORD_LEN,
};
use contact_book::shared::{sort_newest_first, Field, NewContact};
use proptest::prelude::*;

proptest! {
    #[test]
    fn prop_email_without_at_is_invalid(s in "[a-zA-Z0-9._%+-]{0,40}") {
        prop_assert!(!is_valid_email(&s));
    }

    #[test]
    fn prop_plain_addresses_are_valid(
        local in "[a-z0-9._]{1,20}",
        domain in "[a-z0-9]{1,15}",
        tld in "[a-z]{2,6}",
    ) {
        let email = format!("{}@{}.{}", local, domain, tld);
        prop_assert!(is_valid_email(&email));
    }

    #[test]
    fn prop_short_passwords_rejected(password in ".{0,5}") {
        prop_assume!(password.encode_utf16().count() < MIN_PASSWORD_LEN);
        let errors = validate_credentials("ana@x.com", &password).unwrap_err();
        prop_assert!(errors.password.is_some());
        prop_assert!(errors.email.is_none());
    }

    #[test]
    fn prop_long_enough_passwords_accepted(password in ".{6,40}") {
        prop_assert!(validate_credentials("ana@x.com", &password).is_ok());
    }

    #[test]
    fn prop_blank_name_never_validates(
        name in "[ \t]{0,8}",
        message in "[a-z ]{1,30}",
    ) {
        let err = validate_contact(&name, "ana@x.com", &message).unwrap_err();
        prop_assert_eq!(err.field(), Some(Field::Name));
    }

    #[test]
    fn prop_sort_is_newest_first_and_stable_under_repeat(
        entries in prop::collection::vec(("[a-z]{1,6}", 0i64..1_000), 0..40),
    ) {
        let mut records: Vec<_> = entries
            .into_iter()
            .map(|(id, at)| NewContact::new("n", "n@x.com", "m").into_record(id, at))
            .collect();

        sort_newest_first(&mut records);
        for pair in records.windows(2) {
            prop_assert!(pair[0].created_at >= pair[1].created_at);
            if pair[0].created_at == pair[1].created_at {
                prop_assert!(pair[0].id >= pair[1].id);
            }
        }

        let once = records.clone();
        sort_newest_first(&mut records);
        prop_assert_eq!(once, records);
    }
}
