use itinerary_timeline::api::{DEFAULT_ZOOM_LADDER_PX, ZoomController};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum ZoomOp {
    In,
    Out,
    Fit { container: f64, days: u32 },
    ExitFit,
}

fn zoom_op() -> impl Strategy<Value = ZoomOp> {
    prop_oneof![
        Just(ZoomOp::In),
        Just(ZoomOp::Out),
        (0.0f64..5_000.0, 0u32..120).prop_map(|(container, days)| ZoomOp::Fit { container, days }),
        Just(ZoomOp::ExitFit),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    #[test]
    fn day_width_stays_within_ladder(ops in prop::collection::vec(zoom_op(), 0..40)) {
        let mut zoom = ZoomController::new(DEFAULT_ZOOM_LADDER_PX.to_vec(), 3).expect("valid ladder");
        for op in ops {
            match op {
                ZoomOp::In => {
                    zoom.zoom_in();
                }
                ZoomOp::Out => {
                    zoom.zoom_out();
                }
                ZoomOp::Fit { container, days } => {
                    zoom.zoom_to_fit(container, days, 160.0);
                    prop_assert!(zoom.is_fit_zoom());
                }
                ZoomOp::ExitFit => {
                    zoom.exit_fit_zoom();
                    prop_assert!(!zoom.is_fit_zoom());
                }
            }
            let width = zoom.day_width_px();
            prop_assert!(width >= zoom.min_day_width_px());
            prop_assert!(width <= zoom.max_day_width_px());
            if !zoom.is_fit_zoom() {
                prop_assert!(zoom.ladder_px().contains(&width));
            }
        }
    }

    #[test]
    fn zoom_in_never_shrinks_and_out_never_grows(
        ops in prop::collection::vec(zoom_op(), 0..20),
        zoom_in in any::<bool>(),
    ) {
        let mut zoom = ZoomController::new(DEFAULT_ZOOM_LADDER_PX.to_vec(), 3).expect("valid ladder");
        for op in ops {
            if let ZoomOp::Fit { container, days } = op {
                zoom.zoom_to_fit(container, days, 160.0);
            }
        }
        let before = zoom.day_width_px();
        if zoom_in {
            let changed = zoom.zoom_in();
            prop_assert!(zoom.day_width_px() >= before);
            prop_assert_eq!(changed, zoom.day_width_px() > before);
        } else {
            let changed = zoom.zoom_out();
            prop_assert!(zoom.day_width_px() <= before);
            prop_assert_eq!(changed, zoom.day_width_px() < before);
        }
    }
}
