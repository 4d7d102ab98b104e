use lipsync::domain::{InferenceSteps, ParamError};

#[test]
fn given_bounds_when_creating_then_both_ends_are_inclusive() {
    assert_eq!(InferenceSteps::new(10).unwrap().value(), 10);
    assert_eq!(InferenceSteps::new(50).unwrap().value(), 50);
}

#[test]
fn given_value_outside_slider_range_when_creating_then_returns_out_of_range() {
    assert!(matches!(
        InferenceSteps::new(9),
        Err(ParamError::OutOfRange { .. })
    ));
    assert!(matches!(
        InferenceSteps::new(51),
        Err(ParamError::OutOfRange { .. })
    ));
}

#[test]
fn given_no_value_when_defaulting_then_uses_twenty() {
    assert_eq!(InferenceSteps::default().value(), 20);
}

#[test]
fn given_integral_float_text_when_parsing_then_accepts() {
    assert_eq!("25.0".parse::<InferenceSteps>().unwrap().value(), 25);
    assert_eq!("30".parse::<InferenceSteps>().unwrap().value(), 30);
}

#[test]
fn given_fractional_text_when_parsing_then_rejects() {
    assert!(matches!(
        "25.5".parse::<InferenceSteps>(),
        Err(ParamError::NotANumber { .. })
    ));
    assert!("-20".parse::<InferenceSteps>().is_err());
}
