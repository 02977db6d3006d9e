//! Integer program definition.

use std::fmt;

/// Identifier of a variable in an [`IntegerProgram`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct VarId(pub usize);

impl VarId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Domain of a decision variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VarKind {
    /// 0/1 variable.
    Binary,
    /// Real variable within `[lower, upper]`.
    Continuous { lower: f64, upper: f64 },
}

/// A named decision variable.
#[derive(Debug, Clone, PartialEq)]
pub struct VarDef {
    pub name: String,
    pub kind: VarKind,
}

/// Relation between a constraint's left-hand side and its right-hand side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    LessEqual,
    Equal,
    GreaterEqual,
}

impl fmt::Display for Sense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Sense::LessEqual => "<=",
            Sense::Equal => "=",
            Sense::GreaterEqual => ">=",
        })
    }
}

/// A linear constraint `Σ coef·var (sense) rhs`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearConstraint {
    /// Constraint name (for diagnostics only).
    pub name: String,
    /// Sparse `(variable, coefficient)` terms.
    pub terms: Vec<(VarId, f64)>,
    pub sense: Sense,
    pub rhs: f64,
}

impl LinearConstraint {
    pub fn new(name: impl Into<String>, terms: Vec<(VarId, f64)>, sense: Sense, rhs: f64) -> Self {
        Self {
            name: name.into(),
            terms,
            sense,
            rhs,
        }
    }

    /// Convenience: `Σ coef·var <= rhs`.
    pub fn less_equal(name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Self::new(name, terms, Sense::LessEqual, rhs)
    }

    /// Convenience: `Σ coef·var == rhs`.
    pub fn equal(name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Self::new(name, terms, Sense::Equal, rhs)
    }

    /// Convenience: `Σ coef·var >= rhs`.
    pub fn greater_equal(name: impl Into<String>, terms: Vec<(VarId, f64)>, rhs: f64) -> Self {
        Self::new(name, terms, Sense::GreaterEqual, rhs)
    }

    /// Left-hand side value under `values`.
    pub fn activity(&self, values: &[f64]) -> f64 {
        self.terms.iter().map(|&(v, c)| c * values[v.index()]).sum()
    }

    /// Signed slack under `values`; negative means violated.
    ///
    /// For equalities this is `-|lhs - rhs|`.
    pub fn slack(&self, values: &[f64]) -> f64 {
        let lhs = self.activity(values);
        match self.sense {
            Sense::LessEqual => self.rhs - lhs,
            Sense::GreaterEqual => lhs - self.rhs,
            Sense::Equal => -(lhs - self.rhs).abs(),
        }
    }

    /// Returns `true` if `values` satisfies this constraint within `tol`.
    pub fn is_satisfied(&self, values: &[f64], tol: f64) -> bool {
        self.slack(values) >= -tol
    }
}

/// Renders as `name: 1 v0 - 2 v3 <= 4`, variables by index.
impl fmt::Display for LinearConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.name)?;
        for (k, &(v, c)) in self.terms.iter().enumerate() {
            let sign = if c < 0.0 { "-" } else if k == 0 { "" } else { "+" };
            if sign.is_empty() {
                write!(f, " {} v{}", c, v.index())?;
            } else {
                write!(f, " {} {} v{}", sign, c.abs(), v.index())?;
            }
        }
        if self.terms.is_empty() {
            write!(f, " 0")?;
        }
        write!(f, " {} {}", self.sense, self.rhs)
    }
}

/// A minimisation integer program over binary and continuous variables.
///
/// # Examples
///
/// ```
/// use u_subtour::program::{IntegerProgram, LinearConstraint};
///
/// let mut ip = IntegerProgram::new("example");
/// let a = ip.add_binary("a");
/// let b = ip.add_binary("b");
/// ip.set_objective(vec![(a, 3.0), (b, 2.0)]);
/// ip.add_constraint(LinearConstraint::greater_equal("pick", vec![(a, 1.0), (b, 1.0)], 1.0));
/// assert!(ip.validate().is_ok());
/// assert!(ip.is_feasible(&[0.0, 1.0], 1e-9));
/// assert_eq!(ip.objective_value(&[0.0, 1.0]), 2.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct IntegerProgram {
    /// Model name.
    pub name: String,
    variables: Vec<VarDef>,
    objective: Vec<(VarId, f64)>,
    constraints: Vec<LinearConstraint>,
}

impl IntegerProgram {
    /// Creates an empty program.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Adds a 0/1 variable.
    pub fn add_binary(&mut self, name: impl Into<String>) -> VarId {
        self.add_variable(name, VarKind::Binary)
    }

    /// Adds a bounded real variable.
    pub fn add_continuous(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        self.add_variable(name, VarKind::Continuous { lower, upper })
    }

    fn add_variable(&mut self, name: impl Into<String>, kind: VarKind) -> VarId {
        let id = VarId(self.variables.len());
        self.variables.push(VarDef {
            name: name.into(),
            kind,
        });
        id
    }

    /// Sets the (minimisation) objective.
    pub fn set_objective(&mut self, terms: Vec<(VarId, f64)>) {
        self.objective = terms;
    }

    /// Appends a constraint.
    pub fn add_constraint(&mut self, constraint: LinearConstraint) {
        self.constraints.push(constraint);
    }

    pub fn variables(&self) -> &[VarDef] {
        &self.variables
    }

    pub fn objective(&self) -> &[(VarId, f64)] {
        &self.objective
    }

    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    pub fn num_variables(&self) -> usize {
        self.variables.len()
    }

    pub fn num_constraints(&self) -> usize {
        self.constraints.len()
    }

    /// Objective value under `values`.
    pub fn objective_value(&self, values: &[f64]) -> f64 {
        self.objective
            .iter()
            .map(|&(v, c)| c * values[v.index()])
            .sum()
    }

    /// Returns `true` if `values` respects every bound, integrality
    /// requirement and constraint within `tol`.
    pub fn is_feasible(&self, values: &[f64], tol: f64) -> bool {
        if values.len() != self.variables.len() {
            return false;
        }
        let bounds_ok = self.variables.iter().zip(values).all(|(def, &x)| match def.kind {
            VarKind::Binary => x.abs() <= tol || (x - 1.0).abs() <= tol,
            VarKind::Continuous { lower, upper } => x >= lower - tol && x <= upper + tol,
        });
        bounds_ok && self.constraints.iter().all(|c| c.is_satisfied(values, tol))
    }

    /// Checks that every term references an existing variable and that
    /// every coefficient, bound and right-hand side is a number.
    pub fn validate(&self) -> Result<(), String> {
        let n = self.variables.len();
        for def in &self.variables {
            if let VarKind::Continuous { lower, upper } = def.kind {
                if lower.is_nan() || upper.is_nan() || lower > upper {
                    return Err(format!("invalid bounds on {}", def.name));
                }
            }
        }
        for &(v, c) in &self.objective {
            if v.index() >= n {
                return Err(format!("objective references undefined variable {}", v.index()));
            }
            if !c.is_finite() {
                return Err(format!("objective coefficient of {} is not finite", v.index()));
            }
        }
        for constraint in &self.constraints {
            if !constraint.rhs.is_finite() {
                return Err(format!("{}: right-hand side is not finite", constraint.name));
            }
            for &(v, c) in &constraint.terms {
                if v.index() >= n {
                    return Err(format!(
                        "{}: undefined variable {}",
                        constraint.name,
                        v.index()
                    ));
                }
                if !c.is_finite() {
                    return Err(format!("{}: coefficient is not finite", constraint.name));
                }
            }
        }
        Ok(())
    }
}
