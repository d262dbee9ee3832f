/// Unit tests for the balance inquiry core
/// Covers circle resolution, request building and vendor reply interpretation
use bsnl_balance_api::balance::{
    build_request, extract_expiry, interpret, split_balance, VendorOutcome,
};
use bsnl_balance_api::circles::{CircleDirectory, PrepaidDirectory};
use bsnl_balance_api::errors::AppError;
use bsnl_balance_api::models::{BalanceResponse, PrepaidCircle};

fn circle(id: i64, name: &str, code: &str, zone_code: &str) -> PrepaidCircle {
    PrepaidCircle {
        circle_id: id,
        circle_name: name.to_string(),
        zone_id: 1,
        zone_name: "Zone".to_string(),
        circle_code: code.to_string(),
        zone_code: zone_code.to_string(),
    }
}

fn directory() -> PrepaidDirectory {
    CircleDirectory::from_records(vec![
        circle(1, "Andhra Pradesh", "AP", "S"),
        circle(2, "Kerala", "KL", "S"),
        circle(3, "Maharashtra", "MH", "W"),
        circle(4, "Mumbai", "MH", "W2"),
    ])
}

#[cfg(test)]
mod request_builder_tests {
    use super::*;

    #[test]
    fn test_duplicate_code_uses_last_record() {
        let req = build_request("9422012345", "mh", &directory()).unwrap();
        assert_eq!(req.circle_id, 4);
        assert_eq!(req.zone_code, "W2");
        assert_eq!(req.circle_code, "MH");
    }

    #[test]
    fn test_lookup_by_display_name() {
        let req = build_request("9849012345", "andhra pradesh", &directory()).unwrap();
        assert_eq!(req.circle_id, 1);
        assert_eq!(req.circle_code, "AP");
    }

    #[test]
    fn test_phone_copied_verbatim() {
        let req = build_request(" +91-9446012345 ", "KL", &directory()).unwrap();
        assert_eq!(req.phone_no, " +91-9446012345 ");
        assert_eq!(req.prepaid_no, " +91-9446012345 ");
    }

    #[test]
    fn test_empty_directory_still_builds() {
        let req = build_request("9446012345", "KL", &PrepaidDirectory::default()).unwrap();
        assert_eq!(req.circle_id, 0);
        assert_eq!(req.zone_code, "");
    }

    #[test]
    fn test_empty_inputs_rejected_regardless_of_directory() {
        for dir in [directory(), PrepaidDirectory::default()] {
            assert!(matches!(
                build_request("", "", &dir),
                Err(AppError::Validation(_))
            ));
        }
    }
}

#[cfg(test)]
mod interpreter_tests {
    use super::*;

    #[test]
    fn test_documented_examples() {
        assert_eq!(split_balance("Rs.50.00 And valid upto 15-01-2025"), "Rs.50.00 ");
        assert_eq!(extract_expiry("Rs.50.00 And valid upto 15-01-2025"), "15-01-2025");
        assert_eq!(split_balance("Rs.10.00 exp 01-01-2025"), "Rs.10.00 exp 01-01-2025");
        assert_eq!(extract_expiry("Rs.10.00 exp 01-01-2025"), "01-01-2025");
        assert_eq!(extract_expiry("NoSpacesHere"), "NoSpacesHere");
    }

    #[test]
    fn test_first_delimiter_wins() {
        assert_eq!(split_balance("Rs.1 And Rs.2 And 3"), "Rs.1 ");
    }

    #[test]
    fn test_delimiter_inside_word() {
        // "And" is matched as a raw substring
        assert_eq!(split_balance("Rs.7 Andaman 01-02-2025"), "Rs.7 ");
    }

    #[test]
    fn test_expiry_ignores_balance_split() {
        // Expiry comes from the whole text even when the split already cut it off
        assert_eq!(extract_expiry("Rs.1 And"), "And");
        assert_eq!(extract_expiry("Rs.1 valid\tupto\t09-09-2029"), "09-09-2029");
    }

    #[test]
    fn test_trailing_whitespace_gives_empty_expiry() {
        assert_eq!(extract_expiry("Rs.1 valid upto 09-09-2029 "), "");
    }

    #[test]
    fn test_missing_balance_field_yields_empty_response_values() {
        let outcome = interpret(br#"{"STATUS":"SUCCESS"}"#).unwrap();
        let VendorOutcome::Success(success) = outcome else {
            panic!("expected success");
        };
        let response = BalanceResponse::from(&success);
        assert_eq!(response.status, "OK");
        assert_eq!(response.balance, "");
        assert_eq!(response.expiry, "");
    }

    #[test]
    fn test_marker_in_unrelated_field() {
        let raw = br#"{"STATUS":"FAIL","REMARKS":"x","NOTE":"SUCCESS"}"#;
        assert!(matches!(interpret(raw).unwrap(), VendorOutcome::Success(_)));
    }

    #[test]
    fn test_failure_with_missing_fields_decodes() {
        match interpret(b"{}").unwrap() {
            VendorOutcome::Failure(f) => {
                assert_eq!(f.status, "");
                assert_eq!(f.remarks, "");
            }
            other => panic!("expected failure, got {:?}", other),
        }
    }
}
