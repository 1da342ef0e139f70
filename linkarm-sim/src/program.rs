use std::{collections::VecDeque, path::Path};

/// Commanded joint angles in degrees, root first.
#[derive(Clone, Debug, PartialEq)]
pub struct Setpoint(Vec<f32>);

impl Setpoint {
    #[inline]
    pub fn angles(&self) -> &[f32] {
        &self.0
    }
}

impl From<Vec<f32>> for Setpoint {
    fn from(value: Vec<f32>) -> Self {
        Self(value)
    }
}

impl std::fmt::Display for Setpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let angles = self
            .0
            .iter()
            .map(|angle| format!("{:.1}°", angle))
            .collect::<Vec<_>>();

        write!(f, "[{}]", angles.join(", "))
    }
}

/// Queue of setpoints, one per tick.
#[derive(Debug, Default)]
pub struct Program(VecDeque<Setpoint>);

impl Program {
    pub fn load<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let str = std::fs::read_to_string(path)?;

        Ok(str.parse()?)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn next(&mut self) -> Option<Setpoint> {
        self.0.pop_front()
    }
}

impl std::str::FromStr for Program {
    type Err = serde_json::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let setpoints = serde_json::from_str::<Vec<Vec<f32>>>(s)?
            .into_iter()
            .map(Setpoint::from)
            .collect();

        Ok(Self(setpoints))
    }
}

impl FromIterator<Setpoint> for Program {
    fn from_iter<T: IntoIterator<Item = Setpoint>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
