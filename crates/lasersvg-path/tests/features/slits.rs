use lasersvg_core::{Side, TemplateError};
use lasersvg_path::{
    materialize, resolve, tag_slits, Contour, SlitCorrector, SlitOptions, Template,
};

const PARALLEL_SLIT: &str = "m 0,0 l 10,0 l 0,-5 l 3,0 l 0,5 l 10,0";
const TILTED_SLIT: &str = "m 0,0 l 10,0 l 0,-5 l 3,0 l 0,4 l 10,1";

fn commands(template: &Template) -> Vec<String> {
    template.iter().map(|c| c.to_string()).collect()
}

fn end_point(contour: &Contour) -> (f64, f64) {
    let last = resolve(contour).last().copied().unwrap();
    (last.end.x, last.end.y)
}

#[test]
fn test_parallel_walls_touch_only_the_base() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let corrector = SlitCorrector::new(&contour, 3.0, SlitOptions::default()).unwrap();
    let mut template = contour.to_template();

    let report = corrector.correct_walls(&mut template, 3).unwrap();

    assert_eq!(report.corrected, vec![3]);
    assert!(report.issues.is_empty());
    let original = contour.to_template();
    for index in [1, 2, 4, 5] {
        assert_eq!(template.commands()[index], original.commands()[index]);
    }
    assert_eq!(template.commands()[3].to_string(), "l {thickness},0");
}

#[test]
fn test_parallel_slit_shifts_outer_segments() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    assert!(outcome.issues.is_empty());
    assert_eq!(
        commands(&outcome.template),
        vec![
            "m 0,0",
            "l {11.5-0.5*thickness},0",
            "l 0,-5",
            "l {thickness},0",
            "l 0,5",
            "l {11.5-0.5*thickness},0",
        ]
    );
}

#[test]
fn test_parallel_slit_stays_centred() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    for thickness in [0.5, 2.0, 3.0, 4.25, 8.0] {
        let resized = materialize(&outcome.template, thickness).unwrap();
        let segments = resolve(&resized);
        let shift = (thickness - 3.0) / 2.0;

        assert!((segments[1].end.x - (10.0 - shift)).abs() < 1e-4);
        assert!((segments[3].end.x - (13.0 + shift)).abs() < 1e-4);
        assert!((segments[3].length() - thickness).abs() < 1e-4);
        let (x, y) = end_point(&resized);
        assert!((x - 23.0).abs() < 1e-4 && y.abs() < 1e-4);
    }
}

#[test]
fn test_tilted_slit_corrects_walls_and_outers() {
    let contour: Contour = TILTED_SLIT.parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    assert!(outcome.issues.is_empty());
    assert_eq!(
        commands(&outcome.template),
        vec![
            "m 0,0",
            "l {11.5-0.5*thickness},{-0.50001+0.16667*thickness}",
            "l 0,{-4.49999-0.16667*thickness}",
            "l {thickness},0",
            "l 0,{4.50001-0.16667*thickness}",
            "l {11.5-0.5*thickness},{0.49999+0.16667*thickness}",
        ]
    );
}

#[test]
fn test_tilted_slit_keeps_contour_closed() {
    let contour: Contour = TILTED_SLIT.parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    let redrawn = materialize(&outcome.template, 3.0).unwrap();
    for (a, b) in resolve(&redrawn).iter().zip(resolve(&contour).iter()) {
        assert!((a.end - b.end).length() < 1e-4);
    }

    let resized = materialize(&outcome.template, 6.0).unwrap();
    let (x, y) = end_point(&resized);
    assert!((x - 23.0).abs() < 1e-4);
    assert!(y.abs() < 1e-4);
    assert!((resolve(&resized)[3].length() - 6.0).abs() < 1e-4);
}

#[test]
fn test_assume_parallel_uses_outer_tangent() {
    // The cubic leaves horizontally although its chord is tilted.
    let path = "m 0,0 c 0,4 6,1 10,1 l 0,-5 l 3,0 l 0,4 l 10,1";
    let template = path.parse::<Contour>().unwrap().to_template();

    let options = SlitOptions {
        assume_parallel: true,
        ..SlitOptions::default()
    };
    let outcome = tag_slits(&template, &[3], 3.0, options).unwrap();
    let tagged = commands(&outcome.template);
    assert_eq!(tagged[2], "l 0,-5");
    assert_eq!(tagged[4], "l 0,{4.50001-0.16667*thickness}");

    let outcome = tag_slits(&template, &[3], 3.0, SlitOptions::default()).unwrap();
    let tagged = commands(&outcome.template);
    assert_eq!(tagged[2], "l 0,{-4.49999-0.16667*thickness}");
}

#[test]
fn test_early_base_skips_left_side() {
    let contour: Contour = "m 0,0 l 3,0 l 0,5 l 10,0".parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[1], 3.0, SlitOptions::default()).unwrap();

    assert_eq!(
        outcome.template.to_string(),
        "m 0,0 l {thickness},0 l 0,5 l {11.5-0.5*thickness},0"
    );
    assert!(matches!(
        outcome.issues.as_slice(),
        [TemplateError::InsufficientContext {
            index: 1,
            side: Side::Left,
            ..
        }]
    ));
}

#[test]
fn test_close_path_outer_is_left_alone() {
    let contour: Contour = "m 0,0 l 10,0 l 0,-5 l 3,0 l 0,5 z".parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    assert!(outcome.issues.is_empty());
    assert_eq!(
        outcome.template.to_string(),
        "m 0,0 l {11.5-0.5*thickness},0 l 0,-5 l {thickness},0 l 0,5 z"
    );
}

#[test]
fn test_base_must_match_thickness() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let outcome = tag_slits(&contour.to_template(), &[1], 3.0, SlitOptions::default()).unwrap();

    assert_eq!(outcome.template, contour.to_template());
    assert_eq!(
        outcome.issues,
        vec![TemplateError::NotThicknessSegment {
            index: 1,
            length: 10.0,
            thickness: 3.0
        }]
    );
}

#[test]
fn test_neighbouring_slits_compose() {
    let contour: Contour = "m 0,0 l 10,0 l 0,-5 l 3,0 l 0,5 l 10,0 l 0,-5 l 3,0 l 0,5 l 10,0"
        .parse()
        .unwrap();
    let outcome =
        tag_slits(&contour.to_template(), &[3, 7], 3.0, SlitOptions::default()).unwrap();

    assert_eq!(outcome.template.commands()[5].to_string(), "l {13-thickness},0");

    let resized = materialize(&outcome.template, 5.0).unwrap();
    let (x, y) = end_point(&resized);
    assert!((x - 36.0).abs() < 1e-4 && y.abs() < 1e-4);
}

#[test]
fn test_correcting_a_slit_twice_keeps_the_first_correction() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let first = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    let again = tag_slits(&first.template, &[3], 3.0, SlitOptions::default()).unwrap();
    assert_eq!(again.template, first.template);
    assert_eq!(again.issues, vec![TemplateError::AlreadyTagged { index: 3 }]);

    let drawn = materialize(&again.template, 5.0).unwrap();
    assert_eq!(drawn.to_string(), "m 0,0 l 9,0 l 0,-5 l 5,0 l 0,5 l 9,0");
    assert_eq!(end_point(&drawn), (23.0, 0.0));
}

#[test]
fn test_repeated_index_is_corrected_once() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let once = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();
    let twice = tag_slits(&contour.to_template(), &[3, 3], 3.0, SlitOptions::default()).unwrap();

    assert_eq!(twice.template, once.template);
    assert_eq!(twice.issues, vec![TemplateError::AlreadyTagged { index: 3 }]);
}

#[test]
fn test_base_shifted_by_a_neighbour_is_still_corrected() {
    let comb: Contour = "m 0,0 l 10,0 l 0,-5 l 3,0 l 0,5 l 3,0 l 0,-5 l 3,0 l 0,5 l 10,0"
        .parse()
        .unwrap();
    let first = tag_slits(&comb.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();
    assert_eq!(first.template.commands()[5].to_string(), "l {4.5-0.5*thickness},0");

    let second = tag_slits(&first.template, &[5], 3.0, SlitOptions::default()).unwrap();
    assert!(second.issues.is_empty());
    assert_eq!(second.template.commands()[5].to_string(), "l {thickness},0");
}

#[test]
fn test_stored_template_is_read_at_its_own_thickness() {
    let contour: Contour = PARALLEL_SLIT.parse().unwrap();
    let first = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

    // Redrawn at 5, the stored template still describes the same slit.
    let again = tag_slits(&first.template, &[], 5.0, SlitOptions::default()).unwrap();
    assert_eq!(again.template, first.template);
    assert!(again.issues.is_empty());
}

#[test]
fn test_multiple_subpaths_are_rejected() {
    let template: Template = "m 0,0 l 3,0 z m 10,0 l 3,0".parse().unwrap();
    assert_eq!(
        tag_slits(&template, &[1], 3.0, SlitOptions::default()),
        Err(TemplateError::UnsupportedCommandKind {
            index: 3,
            letter: 'm'
        })
    );
}
