/// Logistic step from 0 to 1 centred on `center`.
///
/// `width` sets how quickly the step happens: the value moves from about
/// 0.27 to 0.73 over one `width` either side of the centre.
#[must_use]
pub fn sigmoid(x: f64, center: f64, width: f64) -> f64 {
    1.0 / (1.0 + (-(x - center) / width).exp())
}
