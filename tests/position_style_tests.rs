use itinerary_timeline::render::{PositionStyle, Rect, to_position_style};

#[test]
fn rect_converts_to_pixel_strings() {
    let style = to_position_style(Rect::new(242.5, 28.0, 30.0, 84.0));
    assert_eq!(style.left, "242.5px");
    assert_eq!(style.top, "28px");
    assert_eq!(style.width, "30px");
    assert_eq!(style.height, "84px");
    assert_eq!(
        style.to_string(),
        "left: 242.5px; top: 28px; width: 30px; height: 84px;"
    );
}

#[test]
fn fractional_values_are_rounded_to_thousandths() {
    let style = PositionStyle::from(Rect::new(1.0 / 3.0, 2.0 / 3.0, 10.000_49, 0.0004));
    assert_eq!(style.left, "0.333px");
    assert_eq!(style.top, "0.667px");
    assert_eq!(style.width, "10px");
    assert_eq!(style.height, "0px");
}

#[test]
fn negative_sizes_and_non_finite_values_collapse() {
    let style = to_position_style(Rect::new(f64::NAN, -12.25, -5.0, f64::INFINITY));
    assert_eq!(style.left, "0px");
    assert_eq!(style.top, "-12.25px");
    assert_eq!(style.width, "0px");
    assert_eq!(style.height, "0px");
    assert_eq!(PositionStyle::zero(), to_position_style(Rect::default()));
}

#[test]
fn from_edges_normalizes_reversed_corners() {
    let rect = Rect::from_edges(300.0, 120.0, 200.0, 20.0);
    assert_eq!(rect, Rect::new(200.0, 20.0, 100.0, 100.0));
    assert_eq!(rect.right(), 300.0);
    assert_eq!(rect.center_y(), 70.0);
    assert!(rect.validate().is_ok());
    assert!(Rect::new(0.0, 0.0, -1.0, 1.0).validate().is_err());
}
