//! Immutable snapshot of everything a request needs: property tables,
//! capillary constants and solver settings.

use crate::config::AppConfig;
use crate::dataset::{load_constants, load_tables};
use crate::error::AppResult;
use rc_cycle::{ConstantTable, SizingOptions, SolverConfig};
use rc_fluids::{
    FluidError, LibrarySource, PropertySource, PropertyTable, RefrigerantCatalogEntry, TableSource,
    filter_library_catalog, find_library_fluid, library_catalog,
};
use std::sync::Arc;
use tracing::{debug, warn};

/// How a listed refrigerant is resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Library,
    Table,
}

impl SourceKind {
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::Library => "library",
            SourceKind::Table => "table",
        }
    }
}

/// Refrigerant available for evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct RefrigerantListing {
    pub id: String,
    pub display_name: String,
    pub kind: SourceKind,
}

/// Built once at start-up and shared read-only by every request.
#[derive(Clone)]
pub struct PropertyRegistry {
    tables: Vec<Arc<TableSource>>,
    constants: ConstantTable,
    solver: SolverConfig,
    sizing: SizingOptions,
}

fn normalize(id: &str) -> String {
    id.chars()
        .filter(|c| *c != '-' && !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

impl PropertyRegistry {
    /// Assemble a registry from already loaded datasets.
    ///
    /// Only tables named in `config.table_refrigerants` are kept, in that order.
    pub fn new(config: &AppConfig, tables: Vec<PropertyTable>, constants: ConstantTable) -> Self {
        let mut kept = Vec::new();
        for id in &config.table_refrigerants {
            match tables
                .iter()
                .find(|t| normalize(t.refrigerant().id()) == normalize(id))
            {
                Some(table) => kept.push(Arc::new(TableSource::new(table.clone()))),
                None => warn!(refrigerant = %id, "no property table for configured refrigerant"),
            }
        }
        for table in &tables {
            let id = table.refrigerant().id();
            if !config
                .table_refrigerants
                .iter()
                .any(|c| normalize(c) == normalize(id))
            {
                debug!(
                    refrigerant = id,
                    "table not listed in configuration, ignored"
                );
            }
        }

        Self {
            tables: kept,
            constants,
            solver: config.solver(),
            sizing: config.sizing.options(),
        }
    }

    /// Load the datasets named by `config` and build the registry.
    pub fn load(config: &AppConfig) -> AppResult<Self> {
        config.validate()?;
        let tables = match &config.tables_path {
            Some(path) => load_tables(path)?,
            None => Vec::new(),
        };
        let constants = match &config.constants_path {
            Some(path) => load_constants(path)?,
            None => ConstantTable::empty(),
        };
        Ok(Self::new(config, tables, constants))
    }

    pub fn constants(&self) -> &ConstantTable {
        &self.constants
    }

    pub fn solver(&self) -> &SolverConfig {
        &self.solver
    }

    pub fn sizing(&self) -> &SizingOptions {
        &self.sizing
    }

    /// Property source for `id`: a loaded table first, then the property library.
    pub fn resolve(&self, id: &str) -> AppResult<Arc<dyn PropertySource>> {
        let key = normalize(id);
        if let Some(table) = self
            .tables
            .iter()
            .find(|t| normalize(t.refrigerant().id()) == key)
        {
            debug!(refrigerant = id, "resolved from table");
            return Ok(table.clone());
        }
        if let Some(fluid) = find_library_fluid(id) {
            debug!(
                refrigerant = id,
                coolprop = fluid.coolprop_name(),
                "resolved from library"
            );
            return Ok(Arc::new(LibrarySource::new(fluid)?));
        }
        Err(FluidError::UnknownRefrigerant { id: id.to_string() }.into())
    }

    /// Library refrigerants followed by table-backed ones.
    pub fn list_refrigerants(&self) -> Vec<RefrigerantListing> {
        self.listings(library_catalog(), |_| true)
    }

    /// Refrigerants whose id, name or alias contains `query` (case-insensitive).
    pub fn search_refrigerants(&self, query: &str) -> Vec<RefrigerantListing> {
        let needle = query.trim().to_ascii_lowercase();
        self.listings(&filter_library_catalog(query), |id| {
            id.to_ascii_lowercase().contains(&needle)
        })
    }

    fn listings(
        &self,
        library: &[RefrigerantCatalogEntry],
        keep_table: impl Fn(&str) -> bool,
    ) -> Vec<RefrigerantListing> {
        let library = library.iter().map(|entry| RefrigerantListing {
            id: entry.canonical_id.to_string(),
            display_name: entry.display_name.to_string(),
            kind: SourceKind::Library,
        });
        let tables = self
            .tables
            .iter()
            .filter(|t| keep_table(t.refrigerant().id()))
            .map(|t| RefrigerantListing {
                id: t.refrigerant().id().to_string(),
                display_name: t.refrigerant().id().to_string(),
                kind: SourceKind::Table,
            });
        library.chain(tables).collect()
    }
}
