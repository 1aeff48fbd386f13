use crate::LibraryFluid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefrigerantCatalogEntry {
    pub fluid: LibraryFluid,
    pub canonical_id: &'static str,
    pub display_name: &'static str,
    pub aliases: &'static [&'static str],
}

impl RefrigerantCatalogEntry {
    pub fn matches_query(&self, query: &str) -> bool {
        let query = query.trim().to_ascii_lowercase();
        if query.is_empty() {
            return true;
        }

        self.canonical_id.to_ascii_lowercase().contains(&query)
            || self.display_name.to_ascii_lowercase().contains(&query)
            || self
                .aliases
                .iter()
                .any(|alias| alias.to_ascii_lowercase().contains(&query))
    }
}

const LIBRARY_CATALOG: [RefrigerantCatalogEntry; 48] = [
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R11,
        canonical_id: "R11",
        display_name: "R11 (Trichlorofluoromethane)",
        aliases: &["CFC-11"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R12,
        canonical_id: "R12",
        display_name: "R12 (Dichlorodifluoromethane)",
        aliases: &["CFC-12"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R13,
        canonical_id: "R13",
        display_name: "R13 (Chlorotrifluoromethane)",
        aliases: &["CFC-13"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R14,
        canonical_id: "R14",
        display_name: "R14 (Tetrafluoromethane)",
        aliases: &["CF4"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R22,
        canonical_id: "R22",
        display_name: "R22 (Chlorodifluoromethane)",
        aliases: &["HCFC-22"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R23,
        canonical_id: "R23",
        display_name: "R23 (Trifluoromethane)",
        aliases: &["HFC-23"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R32,
        canonical_id: "R32",
        display_name: "R32 (Difluoromethane)",
        aliases: &["HFC-32"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R113,
        canonical_id: "R113",
        display_name: "R113 (Trichlorotrifluoroethane)",
        aliases: &["CFC-113"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R114,
        canonical_id: "R114",
        display_name: "R114 (Dichlorotetrafluoroethane)",
        aliases: &["CFC-114"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R123,
        canonical_id: "R123",
        display_name: "R123 (Dichlorotrifluoroethane)",
        aliases: &["HCFC-123"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R124,
        canonical_id: "R124",
        display_name: "R124 (Chlorotetrafluoroethane)",
        aliases: &["HCFC-124"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R125,
        canonical_id: "R125",
        display_name: "R125 (Pentafluoroethane)",
        aliases: &["HFC-125"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R134a,
        canonical_id: "R134a",
        display_name: "R134a (Tetrafluoroethane)",
        aliases: &["HFC-134a"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R141b,
        canonical_id: "R141b",
        display_name: "R141b (Dichlorofluoroethane)",
        aliases: &["HCFC-141b"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R142b,
        canonical_id: "R142b",
        display_name: "R142b (Chlorodifluoroethane)",
        aliases: &["HCFC-142b"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R143a,
        canonical_id: "R143a",
        display_name: "R143a (Trifluoroethane)",
        aliases: &["HFC-143a"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R152a,
        canonical_id: "R152a",
        display_name: "R152a (Difluoroethane)",
        aliases: &["HFC-152a"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R161,
        canonical_id: "R161",
        display_name: "R161 (Fluoroethane)",
        aliases: &["HFC-161"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R218,
        canonical_id: "R218",
        display_name: "R218 (Octafluoropropane)",
        aliases: &[],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R227ea,
        canonical_id: "R227ea",
        display_name: "R227ea (Heptafluoropropane)",
        aliases: &["HFC-227ea"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R236ea,
        canonical_id: "R236ea",
        display_name: "R236ea",
        aliases: &["HFC-236ea"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R236fa,
        canonical_id: "R236fa",
        display_name: "R236fa",
        aliases: &["HFC-236fa"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R245ca,
        canonical_id: "R245ca",
        display_name: "R245ca",
        aliases: &["HFC-245ca"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R245fa,
        canonical_id: "R245fa",
        display_name: "R245fa",
        aliases: &["HFC-245fa"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R365mfc,
        canonical_id: "R365mfc",
        display_name: "R365mfc",
        aliases: &["HFC-365mfc"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::RC318,
        canonical_id: "RC318",
        display_name: "RC318 (Octafluorocyclobutane)",
        aliases: &[],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R404A,
        canonical_id: "R404A",
        display_name: "R404A",
        aliases: &[],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R407C,
        canonical_id: "R407C",
        display_name: "R407C",
        aliases: &[],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R410A,
        canonical_id: "R410A",
        display_name: "R410A",
        aliases: &[],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R507A,
        canonical_id: "R507A",
        display_name: "R507A",
        aliases: &[],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1233zdE,
        canonical_id: "R1233zd(E)",
        display_name: "R1233zd(E)",
        aliases: &["HCFO-1233zd(E)"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1234yf,
        canonical_id: "R1234yf",
        display_name: "R1234yf",
        aliases: &["HFO-1234yf"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1234zeE,
        canonical_id: "R1234ze(E)",
        display_name: "R1234ze(E)",
        aliases: &["HFO-1234ze(E)"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1234zeZ,
        canonical_id: "R1234ze(Z)",
        display_name: "R1234ze(Z)",
        aliases: &["HFO-1234ze(Z)"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1243zf,
        canonical_id: "R1243zf",
        display_name: "R1243zf",
        aliases: &["HFO-1243zf"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1336mzzE,
        canonical_id: "R1336mzz(E)",
        display_name: "R1336mzz(E)",
        aliases: &["HFO-1336mzz(E)"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R170,
        canonical_id: "R170",
        display_name: "R170 (Ethane)",
        aliases: &["ethane"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R290,
        canonical_id: "R290",
        display_name: "R290 (Propane)",
        aliases: &["propane"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R600,
        canonical_id: "R600",
        display_name: "R600 (Butane)",
        aliases: &["butane"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R600a,
        canonical_id: "R600a",
        display_name: "R600a (Isobutane)",
        aliases: &["isobutane"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R601,
        canonical_id: "R601",
        display_name: "R601 (Pentane)",
        aliases: &["pentane"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R601a,
        canonical_id: "R601a",
        display_name: "R601a (Isopentane)",
        aliases: &["isopentane"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1150,
        canonical_id: "R1150",
        display_name: "R1150 (Ethylene)",
        aliases: &["ethylene"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R1270,
        canonical_id: "R1270",
        display_name: "R1270 (Propylene)",
        aliases: &["propylene", "propene"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R717,
        canonical_id: "R717",
        display_name: "R717 (Ammonia)",
        aliases: &["ammonia", "NH3"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R718,
        canonical_id: "R718",
        display_name: "R718 (Water)",
        aliases: &["water", "H2O"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R744,
        canonical_id: "R744",
        display_name: "R744 (Carbon Dioxide)",
        aliases: &["CO2", "carbon dioxide"],
    },
    RefrigerantCatalogEntry {
        fluid: LibraryFluid::R764,
        canonical_id: "R764",
        display_name: "R764 (Sulfur Dioxide)",
        aliases: &["SO2", "sulfur dioxide"],
    },
];

pub fn library_catalog() -> &'static [RefrigerantCatalogEntry] {
    &LIBRARY_CATALOG
}

pub fn filter_library_catalog(query: &str) -> Vec<RefrigerantCatalogEntry> {
    library_catalog()
        .iter()
        .copied()
        .filter(|entry| entry.matches_query(query))
        .collect()
}

/// Exact lookup of a library refrigerant by id or alias.
pub fn find_library_fluid(id: &str) -> Option<LibraryFluid> {
    if let Ok(fluid) = id.parse::<LibraryFluid>() {
        return Some(fluid);
    }
    library_catalog()
        .iter()
        .find(|entry| {
            entry
                .aliases
                .iter()
                .any(|alias| alias.eq_ignore_ascii_case(id.trim()))
        })
        .map(|entry| entry.fluid)
}
