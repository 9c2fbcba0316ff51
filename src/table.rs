use std::collections::HashMap;

use anyhow::{Context, Result};
use arrow::array::{
    Array, ArrayRef, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    LargeStringArray, StringArray,
};
use arrow::datatypes::{DataType, SchemaRef};
use arrow::record_batch::RecordBatch;
use bytes::Bytes;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

/// A decoded feed file: the column schema plus the record batches the
/// reader produced. Columns stay physically split across batches ("chunks"),
/// so a logical row index has to be resolved to a (chunk, offset) pair.
///
/// Upstream schemas drift release to release, so every per-row lookup
/// degrades to a zero value instead of failing: a renamed column must not
/// abort ingestion of an otherwise valid file. The only fatal errors are the
/// ones raised before any row exists (open, schema read, materialization).
#[derive(Debug)]
pub struct FeedTable {
    columns: HashMap<String, usize>,
    batches: Vec<RecordBatch>,
    rows: usize,
}

impl FeedTable {
    pub fn decode(data: &[u8]) -> Result<Self> {
        Self::decode_with(data, None)
    }

    /// Decode with an optional schema observer. The observer fires once with
    /// the full column-name list; ingest tooling wires it to stdout to spot
    /// upstream renames, tests leave it unset.
    pub fn decode_with(data: &[u8], schema_log: Option<&dyn Fn(&[String])>) -> Result<Self> {
        let buf = Bytes::copy_from_slice(data);
        let builder =
            ParquetRecordBatchReaderBuilder::try_new(buf).context("open parquet reader")?;

        let schema = builder.schema().clone();
        let columns = index_schema(&schema);
        if let Some(log) = schema_log {
            let names = schema
                .fields()
                .iter()
                .map(|field| field.name().clone())
                .collect::<Vec<_>>();
            log(&names);
        }

        let reader = builder.build().context("read feed schema")?;
        let mut batches = Vec::new();
        let mut rows = 0usize;
        for batch in reader {
            let batch = batch.context("materialize record batches")?;
            rows += batch.num_rows();
            batches.push(batch);
        }

        Ok(Self {
            columns,
            batches,
            rows,
        })
    }

    #[cfg(test)]
    fn from_batches(schema: &SchemaRef, batches: Vec<RecordBatch>) -> Self {
        let rows = batches.iter().map(RecordBatch::num_rows).sum();
        Self {
            columns: index_schema(schema),
            batches,
            rows,
        }
    }

    pub fn num_rows(&self) -> usize {
        self.rows
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Resolve a logical row index to the chunk holding it. Mapping walks
    /// rows in order, one pass per table, so the linear scan is fine.
    fn locate(&self, col: usize, row: usize) -> Option<(&ArrayRef, usize)> {
        let mut offset = row;
        for batch in &self.batches {
            if offset < batch.num_rows() {
                return Some((batch.column(col), offset));
            }
            offset -= batch.num_rows();
        }
        None
    }

    /// The one generic accessor behind all typed getters. Yields the type's
    /// zero value when the column is absent, the chunk's storage type does
    /// not convert, or the value is null.
    pub fn value<T: ColumnValue>(&self, name: &str, row: usize) -> T {
        let Some(&col) = self.columns.get(name) else {
            return T::default();
        };
        let Some((array, offset)) = self.locate(col, row) else {
            return T::default();
        };
        if array.is_null(offset) {
            return T::default();
        }
        T::extract(&ColumnChunk::classify(array.as_ref()), offset).unwrap_or_default()
    }

    pub fn get_string(&self, name: &str, row: usize) -> String {
        self.value(name, row)
    }

    pub fn get_int(&self, name: &str, row: usize) -> i64 {
        self.value(name, row)
    }

    pub fn get_float(&self, name: &str, row: usize) -> f64 {
        self.value(name, row)
    }

    pub fn get_bool(&self, name: &str, row: usize) -> bool {
        self.value(name, row)
    }
}

fn index_schema(schema: &SchemaRef) -> HashMap<String, usize> {
    schema
        .fields()
        .iter()
        .enumerate()
        .map(|(idx, field)| (field.name().clone(), idx))
        .collect()
}

/// The storage types a chunk may carry. Classification happens at this one
/// boundary; extraction matches on the closed set of variants, so a type the
/// feed starts shipping tomorrow lands on `Unsupported` and the getter's
/// default, never a panic.
pub enum ColumnChunk<'a> {
    Utf8(&'a StringArray),
    LargeUtf8(&'a LargeStringArray),
    Int32(&'a Int32Array),
    Int64(&'a Int64Array),
    Float32(&'a Float32Array),
    Float64(&'a Float64Array),
    Bool(&'a BooleanArray),
    Unsupported,
}

impl<'a> ColumnChunk<'a> {
    fn classify(array: &'a dyn Array) -> Self {
        let any = array.as_any();
        match array.data_type() {
            DataType::Utf8 => any
                .downcast_ref::<StringArray>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::Utf8),
            DataType::LargeUtf8 => any
                .downcast_ref::<LargeStringArray>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::LargeUtf8),
            DataType::Int32 => any
                .downcast_ref::<Int32Array>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::Int32),
            DataType::Int64 => any
                .downcast_ref::<Int64Array>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::Int64),
            DataType::Float32 => any
                .downcast_ref::<Float32Array>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::Float32),
            DataType::Float64 => any
                .downcast_ref::<Float64Array>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::Float64),
            DataType::Boolean => any
                .downcast_ref::<BooleanArray>()
                .map_or(ColumnChunk::Unsupported, ColumnChunk::Bool),
            _ => ColumnChunk::Unsupported,
        }
    }
}

/// A value type the generic accessor can pull out of a chunk. `Default`
/// doubles as the degrade value for misses.
pub trait ColumnValue: Default {
    fn extract(chunk: &ColumnChunk<'_>, offset: usize) -> Option<Self>;
}

impl ColumnValue for String {
    fn extract(chunk: &ColumnChunk<'_>, offset: usize) -> Option<Self> {
        match chunk {
            ColumnChunk::Utf8(arr) => Some(arr.value(offset).to_string()),
            ColumnChunk::LargeUtf8(arr) => Some(arr.value(offset).to_string()),
            _ => None,
        }
    }
}

impl ColumnValue for i64 {
    fn extract(chunk: &ColumnChunk<'_>, offset: usize) -> Option<Self> {
        match chunk {
            ColumnChunk::Int64(arr) => Some(arr.value(offset)),
            ColumnChunk::Int32(arr) => Some(i64::from(arr.value(offset))),
            // Some weekly feeds ship counting stats as doubles.
            ColumnChunk::Float64(arr) => Some(arr.value(offset) as i64),
            _ => None,
        }
    }
}

impl ColumnValue for f64 {
    fn extract(chunk: &ColumnChunk<'_>, offset: usize) -> Option<Self> {
        match chunk {
            ColumnChunk::Float64(arr) => Some(arr.value(offset)),
            ColumnChunk::Float32(arr) => Some(f64::from(arr.value(offset))),
            _ => None,
        }
    }
}

impl ColumnValue for bool {
    fn extract(chunk: &ColumnChunk<'_>, offset: usize) -> Option<Self> {
        match chunk {
            ColumnChunk::Bool(arr) => Some(arr.value(offset)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use arrow::array::{Float64Array, Int32Array, Int64Array, StringArray};
    use arrow::datatypes::{DataType, Field, Schema};

    use super::*;

    fn two_chunk_table() -> FeedTable {
        let schema = Arc::new(Schema::new(vec![
            Field::new("name", DataType::Utf8, true),
            Field::new("narrow", DataType::Int32, true),
            Field::new("loose", DataType::Float64, true),
        ]));
        let first = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("a"), None])),
                Arc::new(Int32Array::from(vec![Some(1), Some(2)])),
                Arc::new(Float64Array::from(vec![Some(9.9), Some(8.5)])),
            ],
        )
        .expect("first batch should build");
        let second = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(StringArray::from(vec![Some("c")])),
                Arc::new(Int32Array::from(vec![None::<i32>])),
                Arc::new(Float64Array::from(vec![Some(-3.25)])),
            ],
        )
        .expect("second batch should build");
        FeedTable::from_batches(&schema, vec![first, second])
    }

    #[test]
    fn lookup_crosses_chunk_boundaries() {
        let table = two_chunk_table();
        assert_eq!(table.num_rows(), 3);
        assert_eq!(table.get_string("name", 0), "a");
        assert_eq!(table.get_string("name", 2), "c");
        assert_eq!(table.get_int("narrow", 1), 2);
        assert_eq!(table.get_float("loose", 2), -3.25);
    }

    #[test]
    fn nulls_and_out_of_range_rows_default() {
        let table = two_chunk_table();
        assert_eq!(table.get_string("name", 1), "");
        assert_eq!(table.get_int("narrow", 2), 0);
        assert_eq!(table.get_string("name", 99), "");
    }

    #[test]
    fn absent_column_defaults() {
        let table = two_chunk_table();
        assert!(!table.has_column("renamed_upstream"));
        assert_eq!(table.get_int("renamed_upstream", 0), 0);
        assert_eq!(table.get_string("renamed_upstream", 0), "");
    }

    #[test]
    fn storage_type_mismatch_defaults() {
        let table = two_chunk_table();
        assert!(!table.get_bool("name", 0));
        assert_eq!(table.get_string("narrow", 0), "");
        assert_eq!(table.get_float("narrow", 0), 0.0);
    }

    #[test]
    fn int_getter_widens_and_truncates() {
        let table = two_chunk_table();
        // Int32 widens.
        assert_eq!(table.get_int("narrow", 0), 1);
        // Float64-backed counting stats truncate.
        assert_eq!(table.get_int("loose", 0), 9);
    }

    #[test]
    fn int64_columns_read_back() {
        let schema = Arc::new(Schema::new(vec![Field::new("v", DataType::Int64, true)]));
        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(Int64Array::from(vec![7i64, 8, 9]))],
        )
        .expect("batch should build");
        let table = FeedTable::from_batches(&schema, vec![batch]);
        for (row, want) in [7i64, 8, 9].into_iter().enumerate() {
            assert_eq!(table.get_int("v", row), want);
        }
    }
}
