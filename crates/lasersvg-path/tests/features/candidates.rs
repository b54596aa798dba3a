use lasersvg_path::{candidates, Contour};
use lasersvg_core::TemplateError;

#[test]
fn test_candidates_report_absolute_geometry() {
    let contour: Contour = "m 0,0 l 10,0 l 0,5 l 3,0 l 0,-5 l 10,0".parse().unwrap();
    let found = candidates(&contour, 5.0, 0.1).unwrap();

    let indices: Vec<usize> = found.iter().map(|c| c.index).collect();
    assert_eq!(indices, vec![2, 4]);
    assert!(found.iter().all(|c| !c.early && c.letter == 'l'));

    assert_eq!((found[0].start.x, found[0].start.y), (10.0, 0.0));
    assert_eq!((found[0].end.x, found[0].end.y), (10.0, 5.0));
    assert_eq!((found[1].start.x, found[1].start.y), (13.0, 5.0));
    assert_eq!(found[1].length, 5.0);
}

#[test]
fn test_candidates_flag_early_indices() {
    let contour: Contour = "m 0,0 h 5 v 10 h -5".parse().unwrap();
    let found = candidates(&contour, 5.0, 0.1).unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!((found[0].index, found[0].early), (1, true));
    assert_eq!((found[1].index, found[1].early), (3, false));
    assert_eq!(found[1].letter, 'h');
}

#[test]
fn test_candidates_skip_moves_and_arcs() {
    let contour: Contour = "m 2,0 a 1,1 0 0 1 2,0 l 0,2 z".parse().unwrap();
    let found = candidates(&contour, 2.0, 0.1).unwrap();

    // Only the line can be tagged; the move and the arc chord are 2 long too.
    assert_eq!(found.len(), 1);
    assert_eq!((found[0].index, found[0].letter), (2, 'l'));
}

#[test]
fn test_candidates_serialize_to_json() {
    let contour: Contour = "m 0,0 l 10,0 l 0,5".parse().unwrap();
    let found = candidates(&contour, 5.0, 0.1).unwrap();
    let json = serde_json::to_value(&found).unwrap();

    assert_eq!(json[0]["index"], 2);
    assert_eq!(json[0]["letter"], "l");
    assert_eq!(json[0]["length"], 5.0);
    assert_eq!(json[0]["early"], false);
}

#[test]
fn test_candidates_reject_bad_thickness() {
    let contour: Contour = "m 0,0 l 10,0".parse().unwrap();
    assert_eq!(
        candidates(&contour, -1.0, 0.1),
        Err(TemplateError::InvalidThickness { value: -1.0 })
    );
}
