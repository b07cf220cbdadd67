use nalgebra::Vector3;

/// Hermite interpolating polynomial matching both values and first
/// derivatives at each node (each node counts twice), in Newton form.
#[derive(Debug, Clone)]
pub(crate) struct Hermite {
    /// Doubled nodes z_0, z_0, z_1, z_1, ..
    nodes: Vec<f64>,
    /// Newton coefficients (divided differences)
    coefficients: Vec<Vector3<f64>>,
}

impl Hermite {
    /// Builds the interpolating polynomial from (abscissa, value, derivative) triplets.
    /// Abscissas must be distinct.
    pub fn new(points: &[(f64, Vector3<f64>, Vector3<f64>)]) -> Self {
        let size = 2 * points.len();

        let mut nodes = Vec::with_capacity(size);
        let mut coefficients = Vec::with_capacity(size);

        for (x, value, _) in points.iter() {
            nodes.push(*x);
            nodes.push(*x);
            coefficients.push(*value);
            coefficients.push(*value);
        }

        for order in 1..size {
            for k in (order..size).rev() {
                coefficients[k] = if order == 1 && k % 2 == 1 {
                    // repeated node: divided difference is the derivative
                    points[k / 2].2
                } else {
                    (coefficients[k] - coefficients[k - 1]) / (nodes[k] - nodes[k - order])
                };
            }
        }

        Self {
            nodes,
            coefficients,
        }
    }

    /// Evaluates value and first derivative at `x`
    pub fn evaluate(&self, x: f64) -> (Vector3<f64>, Vector3<f64>) {
        let size = self.coefficients.len();

        let mut value = self.coefficients[size - 1];
        let mut derivative = Vector3::<f64>::zeros();

        for k in (0..size - 1).rev() {
            let dx = x - self.nodes[k];
            derivative = derivative * dx + value;
            value = value * dx + self.coefficients[k];
        }

        (value, derivative)
    }
}
