//! 면적/체적/온도 단위 변환 회귀 테스트.
use farm_water_toolbox::conversion::{convert, ConversionError};
use farm_water_toolbox::quantity::QuantityKind;
use farm_water_toolbox::units::{convert_area, to_celsius, AreaUnit, TemperatureUnit};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn hectare_and_acre_to_square_meters() {
    assert_eq!(convert_area(1.0, AreaUnit::Hectare, AreaUnit::SquareMeter), 10_000.0);
    assert_close(
        "acre",
        convert(QuantityKind::Area, 1.0, "acre", "m2").unwrap(),
        4046.86,
        1e-12,
    );
    assert_close(
        "ha->acre",
        convert(QuantityKind::Area, 1.0, "ha", "acre").unwrap(),
        10_000.0 / 4046.86,
        1e-12,
    );
}

#[test]
fn liters_to_cubic_meters_and_gallons() {
    assert_close(
        "m3",
        convert(QuantityKind::Volume, 3000.0, "L", "m3").unwrap(),
        3.0,
        1e-12,
    );
    assert_close(
        "gal",
        convert(QuantityKind::Volume, 3.78541, "L", "gal").unwrap(),
        1.0,
        1e-9,
    );
}

#[test]
fn fahrenheit_to_celsius() {
    assert_close("95F", to_celsius(95.0, TemperatureUnit::Fahrenheit), 35.0, 1e-9);
    assert_close(
        "K",
        convert(QuantityKind::Temperature, 303.15, "K", "C").unwrap(),
        30.0,
        1e-9,
    );
}

#[test]
fn unknown_unit_is_reported() {
    let err = convert(QuantityKind::Area, 1.0, "bigha", "m2").unwrap_err();
    assert!(matches!(err, ConversionError::UnknownUnit(ref u) if u == "bigha"));
    assert_eq!("volume".parse::<QuantityKind>(), Ok(QuantityKind::Volume));
}
