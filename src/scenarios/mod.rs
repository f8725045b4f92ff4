/////////////////////////////////////////////////////////////////////////////////////
//
// Epitools - epidemic model utilities
//
// scenarios module
//
// builds scenario grids as the cartesian product of named parameter axes
//
////////////////////////////////////////////////////////////////////////////////////

/// Lazy cartesian product over named value axes. Every combination comes out
/// as a labeled record, with the last-named axis varying fastest. Each call
/// builds a fresh iterator.
pub fn named_product<T: Clone>(axes: Vec<(&str, Vec<T>)>) -> NamedProduct<T> {
    let axes: Vec<(String, Vec<T>)> = axes
        .into_iter()
        .map(|(name, values)| (name.to_string(), values))
        .collect();
    NamedProduct::from_axes(axes)
}

pub struct NamedProduct<T> {
    axes: Vec<(String, Vec<T>)>,
    cursor: Vec<usize>,
    done: bool,
}

impl<T: Clone> NamedProduct<T> {
    fn from_axes(axes: Vec<(String, Vec<T>)>) -> NamedProduct<T> {
        // an empty axis empties the whole product
        let done = axes.iter().any(|(_, values)| values.is_empty());
        let cursor = vec![0; axes.len()];
        NamedProduct { axes, cursor, done }
    }
}

impl<T: Clone> Iterator for NamedProduct<T> {
    type Item = Combination<T>;

    fn next(&mut self) -> Option<Combination<T>> {
        if self.done {
            return None;
        }

        let pairs: Vec<(String, T)> = self
            .axes
            .iter()
            .zip(&self.cursor)
            .map(|((name, values), &index)| (name.clone(), values[index].clone()))
            .collect();

        // advance the odometer, rightmost axis first
        let mut axis = self.axes.len();
        loop {
            if axis == 0 {
                self.done = true;
                break;
            }
            axis -= 1;
            self.cursor[axis] += 1;
            if self.cursor[axis] < self.axes[axis].1.len() {
                break;
            }
            self.cursor[axis] = 0;
        }

        Some(Combination { pairs })
    }
}

/// One labeled point of a scenario grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Combination<T> {
    pairs: Vec<(String, T)>,
}

impl<T> Combination<T> {
    /// Component value under its original axis name.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.pairs
            .iter()
            .find(|(axis, _)| axis == name)
            .map(|(_, value)| value)
    }

    /// Components in axis order.
    pub fn pairs(&self) -> &[(String, T)] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<(String, T)> {
        self.pairs
    }
}
