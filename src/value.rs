//! Runtime values and array storage for Glossa.

use crate::diag::GlossaError;
use crate::types::BaseType;
use smol_str::SmolStr;
use std::fmt;

/// A runtime value. Every value that lives in an Environment carries
/// exactly one of these, already coerced to its slot's declared type.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Integer(i64),
    Real(f64),
    Str(SmolStr),
    Bool(bool),
}

impl Value {
    pub fn default_for(base_type: BaseType) -> Self {
        match base_type {
            BaseType::Integer => Value::Integer(0),
            BaseType::Real => Value::Real(0.0),
            BaseType::Char => Value::Str(SmolStr::new_static("")),
            BaseType::Bool => Value::Bool(false),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Integer(_) => "integer",
            Value::Real(_) => "real",
            Value::Str(_) => "string",
            Value::Bool(_) => "boolean",
        }
    }

    /// Coerces this value to `target`, following the closed conversion
    /// table: numeric types freely interconvert with each other and with
    /// booleans, but strings never interconvert with anything else.
    pub fn coerce(&self, target: BaseType) -> Result<Value, GlossaError> {
        match (self, target) {
            (Value::Integer(n), BaseType::Integer) => Ok(Value::Integer(*n)),
            (Value::Real(n), BaseType::Integer) => Ok(Value::Integer(*n as i64)),
            (Value::Bool(b), BaseType::Integer) => Ok(Value::Integer(if *b { 1 } else { 0 })),

            (Value::Integer(n), BaseType::Real) => Ok(Value::Real(*n as f64)),
            (Value::Real(n), BaseType::Real) => Ok(Value::Real(*n)),
            (Value::Bool(b), BaseType::Real) => Ok(Value::Real(if *b { 1.0 } else { 0.0 })),

            (Value::Bool(b), BaseType::Bool) => Ok(Value::Bool(*b)),

            (Value::Str(s), BaseType::Char) => Ok(Value::Str(s.clone())),

            (other, target) => Err(GlossaError::runtime(format!(
                "Δεν είναι δυνατή η μετατροπή τιμής τύπου {} σε {target}",
                other.type_name()
            ))),
        }
    }

    /// Coerces toward integer for use as an array index or `DIV`/`MOD`
    /// operand: integers pass, integral reals pass, booleans become 0/1.
    pub fn coerce_index(&self) -> Result<i64, GlossaError> {
        match self {
            Value::Integer(n) => Ok(*n),
            Value::Real(n) if n.fract() == 0.0 => Ok(*n as i64),
            Value::Bool(b) => Ok(if *b { 1 } else { 0 }),
            other => Err(GlossaError::runtime(format!(
                "Μη έγκυρος δείκτης πίνακα: τιμή τύπου {}",
                other.type_name()
            ))),
        }
    }

    pub fn as_bool(&self) -> Result<bool, GlossaError> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(GlossaError::runtime(format!(
                "Αναμενόταν λογική τιμή, βρέθηκε {}",
                other.type_name()
            ))),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Integer(n) => write!(f, "{n}"),
            Value::Real(n) => write!(f, "{n}"),
            Value::Str(s) => write!(f, "{s}"),
            Value::Bool(true) => write!(f, "ΑΛΗΘΗΣ"),
            Value::Bool(false) => write!(f, "ΨΕΥΔΗΣ"),
        }
    }
}

/// A dense rectangular array of 1 or 2 dimensions, stored row-major.
/// External indices are 1-based; `get`/`set` translate to 0-based offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct Array {
    dims: Vec<u32>,
    base_type: BaseType,
    cells: Vec<Value>,
}

impl Array {
    pub fn new(dims: Vec<u32>, base_type: BaseType) -> Self {
        let total: usize = dims.iter().map(|&d| d as usize).product();
        Self {
            cells: vec![Value::default_for(base_type); total],
            dims,
            base_type,
        }
    }

    pub fn base_type(&self) -> BaseType {
        self.base_type
    }

    fn offset(&self, indices: &[i64]) -> Result<usize, GlossaError> {
        if indices.len() != self.dims.len() {
            return Err(GlossaError::runtime(format!(
                "Ο πίνακας έχει {} διαστάσεις, δόθηκαν {}",
                self.dims.len(),
                indices.len()
            )));
        }
        let mut offset = 0usize;
        for (idx, &size) in indices.iter().zip(self.dims.iter()) {
            if *idx < 1 || *idx > size as i64 {
                return Err(GlossaError::runtime(format!(
                    "Δείκτης {idx} εκτός ορίων πίνακα [1..{size}]"
                )));
            }
            offset = offset * size as usize + (*idx as usize - 1);
        }
        Ok(offset)
    }

    pub fn get(&self, indices: &[i64]) -> Result<&Value, GlossaError> {
        let offset = self.offset(indices)?;
        Ok(&self.cells[offset])
    }

    pub fn set(&mut self, indices: &[i64], value: Value) -> Result<(), GlossaError> {
        let offset = self.offset(indices)?;
        self.cells[offset] = value;
        Ok(())
    }
}

/// What lives in a single Environment slot: a scalar value or an array.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
    Scalar(Value),
    Array(Array),
}
