use crate::prelude::Error;

/// Tunable scalar, driven by the estimation layer through its
/// normalized value: `value = reference + scale * normalized`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDriver {
    name: String,
    reference: f64,
    scale: f64,
    value: f64,
    /// Selected drivers are estimated, hence expected in the normalized parameters
    pub selected: bool,
}

impl ParameterDriver {
    /// Creates a new (unselected) [ParameterDriver]
    pub fn new(name: &str, reference: f64, scale: f64) -> Self {
        Self {
            name: name.to_string(),
            reference,
            scale,
            value: reference,
            selected: false,
        }
    }

    /// Copies and returns [ParameterDriver] marked as selected
    pub fn selected(&self) -> Self {
        let mut s = self.clone();
        s.selected = true;
        s
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn reference_value(&self) -> f64 {
        self.reference
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Current (physical) value
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Updates current value from its normalized expression
    pub fn set_normalized_value(&mut self, normalized: f64) {
        self.value = self.reference + self.scale * normalized;
    }

    /// Current value, normalized
    pub fn normalized_value(&self) -> f64 {
        (self.value - self.reference) / self.scale
    }
}

/// Ordered list of [ParameterDriver]s, looked up by name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParameterDrivers {
    drivers: Vec<ParameterDriver>,
}

impl ParameterDrivers {
    /// Appends a new [ParameterDriver]. An existing driver with the same name is replaced.
    pub fn add(&mut self, driver: ParameterDriver) {
        match self.drivers.iter_mut().find(|d| d.name == driver.name) {
            Some(existing) => *existing = driver,
            None => self.drivers.push(driver),
        }
    }

    /// Returns [ParameterDriver] by name
    pub fn find_by_name(&self, name: &str) -> Option<&ParameterDriver> {
        self.drivers.iter().find(|d| d.name == name)
    }

    /// Returns current value of this [ParameterDriver], by name
    pub fn value(&self, name: &str) -> Option<f64> {
        self.find_by_name(name).map(|d| d.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ParameterDriver> + '_ {
        self.drivers.iter()
    }

    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Number of selected drivers
    pub fn nb_selected(&self) -> usize {
        self.drivers.iter().filter(|d| d.selected).count()
    }

    /// Assigns normalized values to the selected drivers, in order.
    /// Consumes as many values as there are selected drivers and
    /// returns the remaining ones.
    pub(crate) fn apply_normalized<'a>(&mut self, normalized: &'a [f64]) -> Result<&'a [f64], Error> {
        let nb_selected = self.nb_selected();
        if normalized.len() < nb_selected {
            return Err(Error::ParameterDimension {
                expected: nb_selected,
                found: normalized.len(),
            });
        }

        let (values, remaining) = normalized.split_at(nb_selected);
        for (driver, value) in self.drivers.iter_mut().filter(|d| d.selected).zip(values) {
            driver.set_normalized_value(*value);
        }

        Ok(remaining)
    }
}

#[cfg(test)]
mod test {
    use super::{ParameterDriver, ParameterDrivers};

    #[test]
    fn normalized_values() {
        let mut drivers = ParameterDrivers::default();
        drivers.add(ParameterDriver::new("a", 1.0, 2.0).selected());
        drivers.add(ParameterDriver::new("b", 5.0, 1.0));
        drivers.add(ParameterDriver::new("c", -1.0, 0.5).selected());

        assert_eq!(drivers.len(), 3);
        assert_eq!(drivers.nb_selected(), 2);

        let remaining = drivers.apply_normalized(&[1.0, 4.0, 9.0]).unwrap();
        assert_eq!(remaining, &[9.0]);

        assert_eq!(drivers.value("a"), Some(3.0));
        assert_eq!(drivers.value("b"), Some(5.0));
        assert_eq!(drivers.value("c"), Some(1.0));
        assert_eq!(drivers.value("d"), None);

        let c = drivers.find_by_name("c").unwrap();
        assert_eq!(c.normalized_value(), 4.0);

        assert!(drivers.apply_normalized(&[1.0]).is_err());
    }
}
