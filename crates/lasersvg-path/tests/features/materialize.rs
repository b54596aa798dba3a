use lasersvg_core::{Error, TemplateError};
use lasersvg_path::{materialize, materialize_str, Template};

#[test]
fn test_materialize_thickness_line() {
    let template: Template = "m 0,0 l 0,{thickness}".parse().unwrap();
    assert_eq!(
        materialize(&template, 3.0).unwrap().to_string(),
        "m 0,0 l 0,3"
    );
    assert_eq!(
        materialize(&template, 0.0).unwrap().to_string(),
        "m 0,0 l 0,0"
    );
}

#[test]
fn test_materialize_is_pure() {
    let template: Template = "m 0,0 l {11.5-0.5*thickness},0 v {-4.5-thickness}"
        .parse()
        .unwrap();
    let before = template.clone();
    let contour = materialize(&template, 4.0).unwrap();
    assert_eq!(template, before);
    assert_eq!(contour.to_string(), "m 0,0 l 9.5,0 v -8.5");
}

#[test]
fn test_materialize_negative_offsets_and_rounding() {
    let template: Template = "m 0,0 l {-0.50001+0.16667*thickness},0".parse().unwrap();
    let contour = materialize(&template, 3.0).unwrap();
    assert_eq!(contour.to_string(), "m 0,0 l 0,0");
}

#[test]
fn test_malformed_template_fails_without_output() {
    match materialize_str("m 0,0 l 10,0 l 0,{2foo*thickness} l 3,0", 3.0) {
        Err(Error::Template(TemplateError::TemplateEvalError { index, .. })) => {
            assert_eq!(index, 2)
        }
        other => panic!("expected evaluation error, got {other:?}"),
    }
}

#[test]
fn test_materialize_str_passes_literal_commands() {
    let contour = materialize_str("m 0,0 c 1,2,3,4,5,{thickness} z", 2.0).unwrap();
    assert_eq!(contour.to_string(), "m 0,0 c 1,2,3,4,5,2 z");
}
