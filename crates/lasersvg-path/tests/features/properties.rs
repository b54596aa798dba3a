use lasersvg_path::{materialize, resolve, tag_all, tag_slits, Contour, PathCommand, SlitOptions};
use proptest::prelude::*;

fn coord() -> impl Strategy<Value = f64> {
    (-10_000i32..10_000).prop_map(|v| f64::from(v) / 100.0)
}

fn command() -> BoxedStrategy<PathCommand> {
    prop_oneof![
        (coord(), coord()).prop_map(|(x, y)| PathCommand::LineTo { x, y }),
        coord().prop_map(|x| PathCommand::HorizontalLine { x }),
        coord().prop_map(|y| PathCommand::VerticalLine { y }),
        (coord(), coord(), coord(), coord(), coord(), coord()).prop_map(
            |(x1, y1, x2, y2, x, y)| PathCommand::CubicCurve {
                x1,
                y1,
                x2,
                y2,
                x,
                y
            }
        ),
        (coord(), coord(), coord(), coord())
            .prop_map(|(x1, y1, x, y)| PathCommand::QuadraticCurve { x1, y1, x, y }),
    ]
    .boxed()
}

fn assemble(x: f64, y: f64, body: Vec<PathCommand>, closed: bool) -> Contour {
    let mut commands = vec![PathCommand::MoveTo { x, y }];
    commands.extend(body);
    if closed {
        commands.push(PathCommand::ClosePath);
    }
    Contour::new(commands)
}

fn contour() -> impl Strategy<Value = Contour> {
    (
        coord(),
        coord(),
        prop::collection::vec(command(), 1..12),
        any::<bool>(),
    )
        .prop_map(|(x, y, body, closed)| assemble(x, y, body, closed))
}

/// A contour mixing random commands with lines exactly one thickness long.
fn contour_with_thickness() -> impl Strategy<Value = (f64, Contour)> {
    (1.0f64..10.0).prop_flat_map(|thickness| {
        let tagged = (0.0f64..std::f64::consts::TAU).prop_map(move |angle| PathCommand::LineTo {
            x: thickness * angle.cos(),
            y: thickness * angle.sin(),
        });
        (
            Just(thickness),
            prop::collection::vec(prop_oneof![command(), tagged.boxed()], 1..12),
        )
            .prop_map(|(thickness, body)| (thickness, assemble(0.0, 0.0, body, true)))
    })
}

proptest! {
    #[test]
    fn prop_reserialized_contour_has_same_deltas(contour in contour()) {
        let reparsed: Contour = contour.to_string().parse().unwrap();
        prop_assert_eq!(reparsed, contour);
    }

    #[test]
    fn prop_tagging_is_idempotent_at_drawn_thickness((thickness, contour) in contour_with_thickness()) {
        let template = tag_all(&contour, thickness, 0.1).unwrap();
        let redrawn = materialize(&template, thickness).unwrap();

        prop_assert_eq!(redrawn.len(), contour.len());
        for (a, b) in redrawn.iter().zip(contour.iter()) {
            prop_assert_eq!(a.kind(), b.kind());
            match (a.delta(), b.delta()) {
                (Some((ax, ay)), Some((bx, by))) => {
                    prop_assert!((ax - bx).abs() < 1e-4, "{} vs {}", a, b);
                    prop_assert!((ay - by).abs() < 1e-4, "{} vs {}", a, b);
                }
                (a, b) => {
                    prop_assert_eq!(a, b);
                }
            }
        }
    }

    #[test]
    fn prop_tilted_slit_closes_at_any_thickness(thickness in 0.5f64..30.0) {
        let contour: Contour = "m 0,0 l 10,0 l 0,-5 l 3,0 l 0,4 l 10,1".parse().unwrap();
        let outcome = tag_slits(&contour.to_template(), &[3], 3.0, SlitOptions::default()).unwrap();

        let resized = materialize(&outcome.template, thickness).unwrap();
        let segments = resolve(&resized);
        let end = segments[segments.len() - 1].end;
        prop_assert!((end.x - 23.0).abs() < 1e-4);
        prop_assert!(end.y.abs() < 1e-4);
        prop_assert!((segments[3].length() - thickness).abs() < 1e-4);
    }
}
