//! Parquet I/O for graph persistence
//!
//! Based on `DuckDB` (Raasveldt et al., SIGMOD 2019) columnar storage patterns.
//!
//! # Format
//!
//! Graphs are stored as two Parquet files:
//! - `{path}_edges.parquet`: (source, target)
//! - `{path}_meta.parquet`: (`num_nodes`), a single row so isolated trailing
//!   vertices survive a round-trip

use super::{CsrGraph, NodeId};
use anyhow::{ensure, Context, Result};
use arrow::array::{UInt32Array, UInt64Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::arrow::arrow_writer::ArrowWriter;
use parquet::file::properties::WriterProperties;
use std::fs::File;
use std::path::Path;
use std::sync::Arc;

impl CsrGraph {
    /// Write graph to Parquet files
    ///
    /// Creates two files:
    /// - `{path}_edges.parquet`: Edge list (source, target)
    /// - `{path}_meta.parquet`: Vertex count
    ///
    /// # Errors
    ///
    /// Returns error if file I/O fails or Arrow conversion fails
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn write_parquet<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let base_path = path.as_ref();

        self.write_edges_parquet(base_path)?;
        self.write_meta_parquet(base_path)?;

        Ok(())
    }

    /// Read graph from Parquet files
    ///
    /// # Errors
    ///
    /// Returns error if files don't exist, Arrow conversion fails, or an edge
    /// endpoint lies outside the recorded vertex count
    #[allow(clippy::unused_async)] // Async API for future I/O operations
    pub async fn read_parquet<P: AsRef<Path>>(path: P) -> Result<Self> {
        let base_path = path.as_ref();

        let num_nodes = Self::read_meta_parquet(base_path)?;
        let edges = Self::read_edges_parquet(base_path)?;

        Self::with_num_nodes(num_nodes, &edges)
            .with_context(|| format!("Corrupt graph at {}", base_path.display()))
    }

    fn write_edges_parquet(&self, base_path: &Path) -> Result<()> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let (sources, targets): (Vec<u32>, Vec<u32>) =
            self.iter_edges().map(|(src, dst)| (src.0, dst.0)).unzip();

        let schema = Arc::new(Schema::new(vec![
            Field::new("source", DataType::UInt32, false),
            Field::new("target", DataType::UInt32, false),
        ]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![
                Arc::new(UInt32Array::from(sources)),
                Arc::new(UInt32Array::from(targets)),
            ],
        )
        .context("Failed to create edges RecordBatch")?;

        write_batch(&edges_path, schema, &batch)
    }

    fn write_meta_parquet(&self, base_path: &Path) -> Result<()> {
        let meta_path = format!("{}_meta.parquet", base_path.display());

        let schema = Arc::new(Schema::new(vec![Field::new(
            "num_nodes",
            DataType::UInt64,
            false,
        )]));

        let batch = RecordBatch::try_new(
            schema.clone(),
            vec![Arc::new(UInt64Array::from(vec![self.num_nodes() as u64]))],
        )
        .context("Failed to create meta RecordBatch")?;

        write_batch(&meta_path, schema, &batch)
    }

    fn read_edges_parquet(base_path: &Path) -> Result<Vec<(NodeId, NodeId)>> {
        let edges_path = format!("{}_edges.parquet", base_path.display());

        let file =
            File::open(&edges_path).with_context(|| format!("Failed to open {edges_path}"))?;

        let reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let mut edges = Vec::new();

        for batch_result in reader {
            let batch: RecordBatch = batch_result?;

            let sources = batch
                .column(0)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid source column type")?;

            let targets = batch
                .column(1)
                .as_any()
                .downcast_ref::<UInt32Array>()
                .context("Invalid target column type")?;

            edges.extend(
                sources
                    .values()
                    .iter()
                    .zip(targets.values().iter())
                    .map(|(&src, &dst)| (NodeId(src), NodeId(dst))),
            );
        }

        Ok(edges)
    }

    fn read_meta_parquet(base_path: &Path) -> Result<usize> {
        let meta_path = format!("{}_meta.parquet", base_path.display());

        let file =
            File::open(&meta_path).with_context(|| format!("Failed to open {meta_path}"))?;

        let mut reader = ParquetRecordBatchReaderBuilder::try_new(file)?.build()?;

        let batch = reader
            .next()
            .context("Missing meta row")?
            .context("Failed to read meta batch")?;
        ensure!(batch.num_rows() == 1, "Expected one meta row, found {}", batch.num_rows());

        let num_nodes = batch
            .column(0)
            .as_any()
            .downcast_ref::<UInt64Array>()
            .context("Invalid num_nodes column type")?
            .value(0);

        usize::try_from(num_nodes).context("num_nodes does not fit in usize")
    }
}

fn write_batch(path: &str, schema: Arc<Schema>, batch: &RecordBatch) -> Result<()> {
    let file = File::create(path).with_context(|| format!("Failed to create {path}"))?;

    let props = WriterProperties::builder()
        .set_compression(parquet::basic::Compression::ZSTD(
            parquet::basic::ZstdLevel::try_new(3)?,
        ))
        .build();

    let mut writer = ArrowWriter::try_new(file, schema, Some(props))?;
    writer.write(batch)?;
    writer.close()?;

    Ok(())
}
