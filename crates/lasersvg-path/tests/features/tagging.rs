use lasersvg_path::{tag_all, tag_selected, Contour, SegmentClassifier, TagOptions};
use lasersvg_core::TemplateError;

#[test]
fn test_tag_all_rewrites_only_thickness_segments() {
    let contour: Contour = "m 0,0 l 10,0 l 0,5 l 3,0 l 0,-5 l 10,0".parse().unwrap();
    let template = tag_all(&contour, 5.0, 0.1).unwrap();

    let commands: Vec<String> = template.iter().map(|c| c.to_string()).collect();
    assert_eq!(
        commands,
        vec!["m 0,0", "l 10,0", "l 0,{thickness}", "l 3,0", "l 0,{-thickness}", "l 10,0"]
    );
}

#[test]
fn test_tag_all_rejects_non_positive_target() {
    let contour: Contour = "m 0,0 l 10,0".parse().unwrap();
    assert_eq!(
        tag_all(&contour, 0.0, 0.1),
        Err(TemplateError::InvalidThickness { value: 0.0 })
    );
    assert!(tag_all(&contour, -3.0, 0.1).is_err());
}

#[test]
fn test_tag_all_within_tolerance() {
    let contour: Contour = "m 0,0 h 3.05 v 2.95 h -3.2".parse().unwrap();
    let template = tag_all(&contour, 3.0, 0.1).unwrap();
    assert_eq!(
        template.to_string(),
        "m 0,0 h {1.01667*thickness} v {0.98333*thickness} h -3.2"
    );
}

#[test]
fn test_tag_all_leaves_arcs_untouched() {
    let contour: Contour = "m 0,0 a 2,2 0 0 1 4,0 l 4,0".parse().unwrap();
    let template = tag_all(&contour, 4.0, 0.1).unwrap();
    assert_eq!(template.to_string(), "m 0,0 a 2,2,0,0,1,4,0 l {thickness},0");
}

#[test]
fn test_tag_selected_skips_other_lengths_and_bad_indices() {
    let contour: Contour = "m 0,0 l 10,0 l 0,5 l 3,0 z".parse().unwrap();
    let template = tag_selected(&contour, &[1, 2, 3, 4, 42], 5.0).unwrap();
    assert_eq!(template.to_string(), "m 0,0 l 10,0 l 0,{thickness} l 3,0 z");
}

#[test]
fn test_tag_selected_restricts_tag_all() {
    let contour: Contour = "m 0,0 l 10,0 l 0,5 l 3,0 l 0,-5 l 10,0".parse().unwrap();
    let template = tag_selected(&contour, &[4], 5.0).unwrap();
    assert_eq!(
        template.to_string(),
        "m 0,0 l 10,0 l 0,5 l 3,0 l 0,{-thickness} l 10,0"
    );
}

#[test]
fn test_tag_selected_collapses_when_enabled() {
    let contour: Contour = "m 0,0 l 3,0 l 0,3".parse().unwrap();
    let classifier = SegmentClassifier::new(
        3.0,
        TagOptions {
            collapse_axis_aligned: true,
            ..TagOptions::default()
        },
    )
    .unwrap();
    let template = classifier.tag_selected(&contour, &[1, 2]);
    assert_eq!(template.to_string(), "m 0,0 h {thickness} v {thickness}");
}
