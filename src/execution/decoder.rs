//! Type-directed row decoding
//!
//! Each output column reads its field through an accessor picked by the
//! column's canonical type. Types the document offers a typed accessor
//! for use it, so representation mismatches surface at extraction. All
//! other types read the raw JSON value and leave conversion to the
//! normalizer.

use crate::document::{Document, DocumentResult, RawValue};
use crate::normalizer::{CoercionResult, TypeCoercionError, ValueNormalizer};
use crate::types::{CanonicalType, OutputSchema, Row};

/// Reads one named field from a document
pub type Accessor = fn(&Document, &str) -> DocumentResult<RawValue>;

/// Canonical types with a typed document accessor
static TYPED_ACCESSORS: [(CanonicalType, Accessor); 7] = [
    (CanonicalType::String, read_string),
    (CanonicalType::Integer, read_int),
    (CanonicalType::Long, read_long),
    (CanonicalType::Double, read_double),
    (CanonicalType::Boolean, read_boolean),
    (CanonicalType::BigInteger, read_number),
    (CanonicalType::BigDecimal, read_number),
];

fn read_string(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get_string(name)?.into())
}

fn read_int(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get_int(name)?.into())
}

fn read_long(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get_long(name)?.into())
}

fn read_double(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get_double(name)?.into())
}

fn read_boolean(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get_boolean(name)?.into())
}

fn read_number(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get_number(name)?.into())
}

fn read_generic(doc: &Document, name: &str) -> DocumentResult<RawValue> {
    Ok(doc.get(name).into())
}

/// Returns the accessor used for `ty`
pub fn accessor_for(ty: CanonicalType) -> Accessor {
    TYPED_ACCESSORS
        .iter()
        .find(|(typed, _)| *typed == ty)
        .map_or(read_generic as Accessor, |(_, accessor)| *accessor)
}

/// Returns true if `ty` has a typed accessor
pub fn has_typed_accessor(ty: CanonicalType) -> bool {
    TYPED_ACCESSORS.iter().any(|(typed, _)| *typed == ty)
}

/// Decodes documents into rows for one output schema
#[derive(Debug, Clone)]
pub struct RowDecoder {
    schema: OutputSchema,
    accessors: Vec<Accessor>,
    verify: bool,
}

impl RowDecoder {
    /// Resolves one accessor per column up front.
    pub fn new(schema: OutputSchema) -> Self {
        let accessors = schema.types().map(accessor_for).collect();
        Self {
            schema,
            accessors,
            verify: true,
        }
    }

    /// Toggles the check that every coerced value matches its column type
    pub fn verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn schema(&self) -> &OutputSchema {
        &self.schema
    }

    /// Decodes one document.
    ///
    /// Missing and null fields become `Null`. The first column that
    /// cannot be read fails the whole row; partial rows are never
    /// returned.
    pub fn decode<N>(&self, doc: &Document, normalizer: &N) -> CoercionResult<Row>
    where
        N: ValueNormalizer + ?Sized,
    {
        let mut values = Vec::with_capacity(self.schema.len());

        for (column, accessor) in self.schema.columns().iter().zip(&self.accessors) {
            let target = column.canonical_type;
            let raw = accessor(doc, &column.name).map_err(|e| {
                TypeCoercionError::from_access(e, target).for_column(&column.name)
            })?;
            let value = normalizer
                .coerce(raw, target)
                .map_err(|e| e.for_column(&column.name))?;

            if self.verify && !value.is_assignable_to(target) {
                let produced = value.canonical_type().map_or("null", |ty| ty.as_str());
                return Err(TypeCoercionError::new(
                    target,
                    produced,
                    format!("normalizer produced {} for a {} column", produced, target),
                )
                .for_column(&column.name));
            }

            values.push(value);
        }

        Ok(Row::new(values))
    }
}
