//! Ordered collection of timestep tables.

use thiserror::Error;

use super::TimestepTable;

/// Error type for dataset construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DatasetError {
    /// Timestep ids and tables differ in count
    #[error("{timesteps} timestep ids for {tables} tables")]
    CountMismatch { timesteps: usize, tables: usize },

    /// A table's rows or columns differ from the first table
    #[error("Table for timestep {timestep} does not match the layout of timestep {reference}")]
    LayoutMismatch { timestep: u32, reference: u32 },
}

/// One timestep id paired with its table.
#[derive(Clone, Debug, PartialEq)]
pub struct Frame {
    /// Simulation output number, as in `multifield.0042.zslice.txt`.
    pub timestep: u32,
    /// Data of this timestep.
    pub table: TimestepTable,
}

/// A sequence of tables, index-aligned with their timestep ids.
///
/// Every table shares the same row count and column set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    frames: Vec<Frame>,
}

impl Dataset {
    /// Pair timestep ids with tables and check the layout invariant.
    ///
    /// # Errors
    /// - `CountMismatch` if the two sequences differ in length
    /// - `LayoutMismatch` if any table differs from the first
    pub fn new(timesteps: Vec<u32>, tables: Vec<TimestepTable>) -> Result<Self, DatasetError> {
        if timesteps.len() != tables.len() {
            return Err(DatasetError::CountMismatch {
                timesteps: timesteps.len(),
                tables: tables.len(),
            });
        }
        let frames = timesteps
            .into_iter()
            .zip(tables)
            .map(|(timestep, table)| Frame { timestep, table })
            .collect();
        let dataset = Self { frames };
        dataset.check_consistency()?;
        Ok(dataset)
    }

    /// Create an empty dataset.
    pub fn empty() -> Self {
        Self { frames: Vec::new() }
    }

    /// Append a frame after checking it against the existing layout.
    pub fn push(&mut self, timestep: u32, table: TimestepTable) -> Result<(), DatasetError> {
        if let Some(first) = self.frames.first() {
            if !first.table.same_layout(&table) {
                return Err(DatasetError::LayoutMismatch {
                    timestep,
                    reference: first.timestep,
                });
            }
        }
        self.frames.push(Frame { timestep, table });
        Ok(())
    }

    /// Verify that every table matches the first one.
    pub fn check_consistency(&self) -> Result<(), DatasetError> {
        let Some(first) = self.frames.first() else {
            return Ok(());
        };
        for frame in &self.frames[1..] {
            if !first.table.same_layout(&frame.table) {
                return Err(DatasetError::LayoutMismatch {
                    timestep: frame.timestep,
                    reference: first.timestep,
                });
            }
        }
        Ok(())
    }

    /// Number of timesteps.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Timestep ids in order.
    pub fn timesteps(&self) -> impl Iterator<Item = u32> + '_ {
        self.frames.iter().map(|f| f.timestep)
    }

    /// All frames.
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Mutable access to the frames; callers must keep the layout uniform.
    pub fn frames_mut(&mut self) -> &mut [Frame] {
        &mut self.frames
    }

    /// Tables in order.
    pub fn tables(&self) -> impl Iterator<Item = &TimestepTable> {
        self.frames.iter().map(|f| &f.table)
    }

    /// Table at a position.
    pub fn table(&self, index: usize) -> Option<&TimestepTable> {
        self.frames.get(index).map(|f| &f.table)
    }

    /// Table of a timestep id.
    pub fn table_for(&self, timestep: u32) -> Option<&TimestepTable> {
        self.frames
            .iter()
            .find(|f| f.timestep == timestep)
            .map(|f| &f.table)
    }

    /// Shared row count, or zero if empty.
    pub fn n_rows(&self) -> usize {
        self.frames.first().map(|f| f.table.n_rows()).unwrap_or(0)
    }
}
