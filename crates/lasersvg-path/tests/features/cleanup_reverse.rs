use lasersvg_path::{remove_short_segments, reverse, tag_all, Contour};

#[test]
fn test_cleanup_before_tagging() {
    let contour: Contour = "m 0,0 l 10,0 l 0.00005,0 l 0,3 l -10,0 z".parse().unwrap();
    let report = remove_short_segments(&contour, 0.0001);

    assert_eq!(report.removed, 1);
    assert_eq!(report.contour.len(), contour.len() - 1);

    let template = tag_all(&report.contour, 3.0, 0.1).unwrap();
    assert_eq!(
        template.to_string(),
        "m 0,0 l 10,0 l 0,{thickness} l -10,0 z"
    );
}

#[test]
fn test_cleanup_with_zero_threshold_drops_only_empty_segments() {
    let contour: Contour = "m 1,1 h 0 l 0.00001,0 v 0 z".parse().unwrap();
    let report = remove_short_segments(&contour, 0.0);

    assert_eq!(report.removed, 2);
    assert_eq!(report.contour.to_string(), "m 1,1 l 0.00001,0 z");
}

#[test]
fn test_reverse_twice_restores_open_contour() {
    let contour: Contour = "m 0,0 l 10,0 c 0,4 6,4 10,0 q 5,5 10,0 v -3 h 2"
        .parse()
        .unwrap();
    let twice = reverse(&reverse(&contour).unwrap()).unwrap();
    assert_eq!(twice, contour);
}

#[test]
fn test_reverse_keeps_thickness_segments() {
    let contour: Contour = "m 0,0 l 10,0 l 0,5 l 3,0 l 0,-5 l 10,0".parse().unwrap();
    let reversed = reverse(&contour).unwrap();
    assert_eq!(
        reversed.to_string(),
        "m 23,0 l -10,0 l 0,5 l -3,0 l 0,-5 l -10,0"
    );

    let template = tag_all(&reversed, 5.0, 0.1).unwrap();
    assert_eq!(
        template.to_string(),
        "m 23,0 l -10,0 l 0,{thickness} l -3,0 l 0,{-thickness} l -10,0"
    );
}

#[test]
fn test_reverse_closed_contour_starts_at_same_point() {
    let contour: Contour = "m 2,3 l 4,0 l 0,4 z".parse().unwrap();
    let reversed = reverse(&contour).unwrap();
    assert_eq!(reversed.to_string(), "m 2,3 l 4,4 l 0,-4 l -4,0 z");
}
