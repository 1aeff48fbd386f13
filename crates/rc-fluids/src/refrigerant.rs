//! Refrigerant identity and the reference-library fluid set.

use std::fmt;

/// Refrigerants resolved through the reference property library (CoolProp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LibraryFluid {
    /// Trichlorofluoromethane
    R11,
    /// Dichlorodifluoromethane
    R12,
    /// Chlorotrifluoromethane
    R13,
    /// Tetrafluoromethane
    R14,
    /// Chlorodifluoromethane
    R22,
    /// Trifluoromethane
    R23,
    /// Difluoromethane
    R32,
    /// 1,1,2-Trichloro-1,2,2-trifluoroethane
    R113,
    /// 1,2-Dichloro-1,1,2,2-tetrafluoroethane
    R114,
    /// 2,2-Dichloro-1,1,1-trifluoroethane
    R123,
    /// 2-Chloro-1,1,1,2-tetrafluoroethane
    R124,
    /// Pentafluoroethane
    R125,
    /// 1,1,1,2-Tetrafluoroethane
    R134a,
    /// 1,1-Dichloro-1-fluoroethane
    R141b,
    /// 1-Chloro-1,1-difluoroethane
    R142b,
    /// 1,1,1-Trifluoroethane
    R143a,
    /// 1,1-Difluoroethane
    R152a,
    /// Fluoroethane
    R161,
    /// Octafluoropropane
    R218,
    /// 1,1,1,2,3,3,3-Heptafluoropropane
    R227ea,
    /// 1,1,1,2,3,3-Hexafluoropropane
    R236ea,
    /// 1,1,1,3,3,3-Hexafluoropropane
    R236fa,
    /// 1,1,2,2,3-Pentafluoropropane
    R245ca,
    /// 1,1,1,3,3-Pentafluoropropane
    R245fa,
    /// 1,1,1,3,3-Pentafluorobutane
    R365mfc,
    /// Octafluorocyclobutane
    RC318,
    /// R404A (pseudo-pure blend)
    R404A,
    /// R407C (pseudo-pure blend)
    R407C,
    /// R410A (pseudo-pure blend)
    R410A,
    /// R507A (pseudo-pure blend)
    R507A,
    /// trans-1-Chloro-3,3,3-trifluoropropene
    R1233zdE,
    /// 2,3,3,3-Tetrafluoropropene
    R1234yf,
    /// trans-1,3,3,3-Tetrafluoropropene
    R1234zeE,
    /// cis-1,3,3,3-Tetrafluoropropene
    R1234zeZ,
    /// 3,3,3-Trifluoropropene
    R1243zf,
    /// trans-1,1,1,4,4,4-Hexafluoro-2-butene
    R1336mzzE,
    /// Ethane
    R170,
    /// Propane
    R290,
    /// n-Butane
    R600,
    /// Isobutane
    R600a,
    /// n-Pentane
    R601,
    /// Isopentane
    R601a,
    /// Ethylene
    R1150,
    /// Propylene
    R1270,
    /// Ammonia
    R717,
    /// Water
    R718,
    /// Carbon dioxide
    R744,
    /// Sulfur dioxide
    R764,
}

impl LibraryFluid {
    pub const ALL: [LibraryFluid; 48] = [
        LibraryFluid::R11,
        LibraryFluid::R12,
        LibraryFluid::R13,
        LibraryFluid::R14,
        LibraryFluid::R22,
        LibraryFluid::R23,
        LibraryFluid::R32,
        LibraryFluid::R113,
        LibraryFluid::R114,
        LibraryFluid::R123,
        LibraryFluid::R124,
        LibraryFluid::R125,
        LibraryFluid::R134a,
        LibraryFluid::R141b,
        LibraryFluid::R142b,
        LibraryFluid::R143a,
        LibraryFluid::R152a,
        LibraryFluid::R161,
        LibraryFluid::R218,
        LibraryFluid::R227ea,
        LibraryFluid::R236ea,
        LibraryFluid::R236fa,
        LibraryFluid::R245ca,
        LibraryFluid::R245fa,
        LibraryFluid::R365mfc,
        LibraryFluid::RC318,
        LibraryFluid::R404A,
        LibraryFluid::R407C,
        LibraryFluid::R410A,
        LibraryFluid::R507A,
        LibraryFluid::R1233zdE,
        LibraryFluid::R1234yf,
        LibraryFluid::R1234zeE,
        LibraryFluid::R1234zeZ,
        LibraryFluid::R1243zf,
        LibraryFluid::R1336mzzE,
        LibraryFluid::R170,
        LibraryFluid::R290,
        LibraryFluid::R600,
        LibraryFluid::R600a,
        LibraryFluid::R601,
        LibraryFluid::R601a,
        LibraryFluid::R1150,
        LibraryFluid::R1270,
        LibraryFluid::R717,
        LibraryFluid::R718,
        LibraryFluid::R744,
        LibraryFluid::R764,
    ];

    /// Canonical id used in requests and reports.
    pub fn key(&self) -> &'static str {
        match self {
            LibraryFluid::R11 => "R11",
            LibraryFluid::R12 => "R12",
            LibraryFluid::R13 => "R13",
            LibraryFluid::R14 => "R14",
            LibraryFluid::R22 => "R22",
            LibraryFluid::R23 => "R23",
            LibraryFluid::R32 => "R32",
            LibraryFluid::R113 => "R113",
            LibraryFluid::R114 => "R114",
            LibraryFluid::R123 => "R123",
            LibraryFluid::R124 => "R124",
            LibraryFluid::R125 => "R125",
            LibraryFluid::R134a => "R134a",
            LibraryFluid::R141b => "R141b",
            LibraryFluid::R142b => "R142b",
            LibraryFluid::R143a => "R143a",
            LibraryFluid::R152a => "R152a",
            LibraryFluid::R161 => "R161",
            LibraryFluid::R218 => "R218",
            LibraryFluid::R227ea => "R227ea",
            LibraryFluid::R236ea => "R236ea",
            LibraryFluid::R236fa => "R236fa",
            LibraryFluid::R245ca => "R245ca",
            LibraryFluid::R245fa => "R245fa",
            LibraryFluid::R365mfc => "R365mfc",
            LibraryFluid::RC318 => "RC318",
            LibraryFluid::R404A => "R404A",
            LibraryFluid::R407C => "R407C",
            LibraryFluid::R410A => "R410A",
            LibraryFluid::R507A => "R507A",
            LibraryFluid::R1233zdE => "R1233zd(E)",
            LibraryFluid::R1234yf => "R1234yf",
            LibraryFluid::R1234zeE => "R1234ze(E)",
            LibraryFluid::R1234zeZ => "R1234ze(Z)",
            LibraryFluid::R1243zf => "R1243zf",
            LibraryFluid::R1336mzzE => "R1336mzz(E)",
            LibraryFluid::R170 => "R170",
            LibraryFluid::R290 => "R290",
            LibraryFluid::R600 => "R600",
            LibraryFluid::R600a => "R600a",
            LibraryFluid::R601 => "R601",
            LibraryFluid::R601a => "R601a",
            LibraryFluid::R1150 => "R1150",
            LibraryFluid::R1270 => "R1270",
            LibraryFluid::R717 => "R717",
            LibraryFluid::R718 => "R718",
            LibraryFluid::R744 => "R744",
            LibraryFluid::R764 => "R764",
        }
    }

    /// CoolProp fluid name.
    pub fn coolprop_name(&self) -> &'static str {
        match self {
            LibraryFluid::R11 => "R11",
            LibraryFluid::R12 => "R12",
            LibraryFluid::R13 => "R13",
            LibraryFluid::R14 => "R14",
            LibraryFluid::R22 => "R22",
            LibraryFluid::R23 => "R23",
            LibraryFluid::R32 => "R32",
            LibraryFluid::R113 => "R113",
            LibraryFluid::R114 => "R114",
            LibraryFluid::R123 => "R123",
            LibraryFluid::R124 => "R124",
            LibraryFluid::R125 => "R125",
            LibraryFluid::R134a => "R134a",
            LibraryFluid::R141b => "R141b",
            LibraryFluid::R142b => "R142b",
            LibraryFluid::R143a => "R143a",
            LibraryFluid::R152a => "R152a",
            LibraryFluid::R161 => "R161",
            LibraryFluid::R218 => "R218",
            LibraryFluid::R227ea => "R227ea",
            LibraryFluid::R236ea => "R236ea",
            LibraryFluid::R236fa => "R236fa",
            LibraryFluid::R245ca => "R245ca",
            LibraryFluid::R245fa => "R245fa",
            LibraryFluid::R365mfc => "R365mfc",
            LibraryFluid::RC318 => "RC318",
            LibraryFluid::R404A => "R404A",
            LibraryFluid::R407C => "R407C",
            LibraryFluid::R410A => "R410A",
            LibraryFluid::R507A => "R507A",
            LibraryFluid::R1233zdE => "R1233zd(E)",
            LibraryFluid::R1234yf => "R1234yf",
            LibraryFluid::R1234zeE => "R1234ze(E)",
            LibraryFluid::R1234zeZ => "R1234ze(Z)",
            LibraryFluid::R1243zf => "R1243zf",
            LibraryFluid::R1336mzzE => "R1336mzz(E)",
            LibraryFluid::R170 => "Ethane",
            LibraryFluid::R290 => "n-Propane",
            LibraryFluid::R600 => "n-Butane",
            LibraryFluid::R600a => "Isobutane",
            LibraryFluid::R601 => "n-Pentane",
            LibraryFluid::R601a => "Isopentane",
            LibraryFluid::R1150 => "Ethylene",
            LibraryFluid::R1270 => "Propylene",
            LibraryFluid::R717 => "Ammonia",
            LibraryFluid::R718 => "Water",
            LibraryFluid::R744 => "CarbonDioxide",
            LibraryFluid::R764 => "SulfurDioxide",
        }
    }

    /// Map to rfluids Pure enum (internal use for CoolProp backend).
    pub(crate) fn rfluids_pure(&self) -> rfluids::substance::Pure {
        use rfluids::substance::Pure;
        match self {
            LibraryFluid::R11 => Pure::R11,
            LibraryFluid::R12 => Pure::R12,
            LibraryFluid::R13 => Pure::R13,
            LibraryFluid::R14 => Pure::R14,
            LibraryFluid::R22 => Pure::R22,
            LibraryFluid::R23 => Pure::R23,
            LibraryFluid::R32 => Pure::R32,
            LibraryFluid::R113 => Pure::R113,
            LibraryFluid::R114 => Pure::R114,
            LibraryFluid::R123 => Pure::R123,
            LibraryFluid::R124 => Pure::R124,
            LibraryFluid::R125 => Pure::R125,
            LibraryFluid::R134a => Pure::R134a,
            LibraryFluid::R141b => Pure::R141b,
            LibraryFluid::R142b => Pure::R142b,
            LibraryFluid::R143a => Pure::R143a,
            LibraryFluid::R152a => Pure::R152a,
            LibraryFluid::R161 => Pure::R161,
            LibraryFluid::R218 => Pure::R218,
            LibraryFluid::R227ea => Pure::R227ea,
            LibraryFluid::R236ea => Pure::R236ea,
            LibraryFluid::R236fa => Pure::R236fa,
            LibraryFluid::R245ca => Pure::R245ca,
            LibraryFluid::R245fa => Pure::R245fa,
            LibraryFluid::R365mfc => Pure::R365mfc,
            LibraryFluid::RC318 => Pure::RC318,
            LibraryFluid::R404A => Pure::R404A,
            LibraryFluid::R407C => Pure::R407C,
            LibraryFluid::R410A => Pure::R410A,
            LibraryFluid::R507A => Pure::R507A,
            LibraryFluid::R1233zdE => Pure::R1233zdE,
            LibraryFluid::R1234yf => Pure::R1234yf,
            LibraryFluid::R1234zeE => Pure::R1234zeE,
            LibraryFluid::R1234zeZ => Pure::R1234zeZ,
            LibraryFluid::R1243zf => Pure::R1243zf,
            LibraryFluid::R1336mzzE => Pure::R1336mzzE,
            LibraryFluid::R170 => Pure::Ethane,
            LibraryFluid::R290 => Pure::nPropane,
            LibraryFluid::R600 => Pure::nButane,
            LibraryFluid::R600a => Pure::Isobutane,
            LibraryFluid::R601 => Pure::nPentane,
            LibraryFluid::R601a => Pure::Isopentane,
            LibraryFluid::R1150 => Pure::Ethylene,
            LibraryFluid::R1270 => Pure::Propylene,
            LibraryFluid::R717 => Pure::Ammonia,
            LibraryFluid::R718 => Pure::Water,
            LibraryFluid::R744 => Pure::CarbonDioxide,
            LibraryFluid::R764 => Pure::SulfurDioxide,
        }
    }
}

impl std::str::FromStr for LibraryFluid {
    type Err = &'static str;

    /// Case-insensitive; `-` and blanks are ignored (`R-134a`, `r134a`, `HFC-134a`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm: String = s
            .trim()
            .chars()
            .filter(|c| *c != '-' && !c.is_whitespace())
            .collect::<String>()
            .to_uppercase();
        match norm.as_str() {
            "R11" | "CFC11" => Ok(LibraryFluid::R11),
            "R12" | "CFC12" => Ok(LibraryFluid::R12),
            "R13" | "CFC13" => Ok(LibraryFluid::R13),
            "R14" | "PFC14" | "CF4" => Ok(LibraryFluid::R14),
            "R22" | "HCFC22" => Ok(LibraryFluid::R22),
            "R23" | "HFC23" => Ok(LibraryFluid::R23),
            "R32" | "HFC32" => Ok(LibraryFluid::R32),
            "R113" | "CFC113" => Ok(LibraryFluid::R113),
            "R114" | "CFC114" => Ok(LibraryFluid::R114),
            "R123" | "HCFC123" => Ok(LibraryFluid::R123),
            "R124" | "HCFC124" => Ok(LibraryFluid::R124),
            "R125" | "HFC125" => Ok(LibraryFluid::R125),
            "R134A" | "HFC134A" => Ok(LibraryFluid::R134a),
            "R141B" | "HCFC141B" => Ok(LibraryFluid::R141b),
            "R142B" | "HCFC142B" => Ok(LibraryFluid::R142b),
            "R143A" | "HFC143A" => Ok(LibraryFluid::R143a),
            "R152A" | "HFC152A" => Ok(LibraryFluid::R152a),
            "R161" | "HFC161" => Ok(LibraryFluid::R161),
            "R218" | "PFC218" => Ok(LibraryFluid::R218),
            "R227EA" | "HFC227EA" => Ok(LibraryFluid::R227ea),
            "R236EA" | "HFC236EA" => Ok(LibraryFluid::R236ea),
            "R236FA" | "HFC236FA" => Ok(LibraryFluid::R236fa),
            "R245CA" | "HFC245CA" => Ok(LibraryFluid::R245ca),
            "R245FA" | "HFC245FA" => Ok(LibraryFluid::R245fa),
            "R365MFC" | "HFC365MFC" => Ok(LibraryFluid::R365mfc),
            "RC318" | "C318" | "PFCC318" => Ok(LibraryFluid::RC318),
            "R404A" => Ok(LibraryFluid::R404A),
            "R407C" => Ok(LibraryFluid::R407C),
            "R410A" => Ok(LibraryFluid::R410A),
            "R507A" => Ok(LibraryFluid::R507A),
            "R1233ZD(E)" | "R1233ZDE" | "HFO1233ZD(E)" | "HCFO1233ZD(E)" => {
                Ok(LibraryFluid::R1233zdE)
            }
            "R1234YF" | "HFO1234YF" => Ok(LibraryFluid::R1234yf),
            "R1234ZE(E)" | "R1234ZEE" | "HFO1234ZE(E)" => Ok(LibraryFluid::R1234zeE),
            "R1234ZE(Z)" | "R1234ZEZ" | "HFO1234ZE(Z)" => Ok(LibraryFluid::R1234zeZ),
            "R1243ZF" | "HFO1243ZF" => Ok(LibraryFluid::R1243zf),
            "R1336MZZ(E)" | "R1336MZZE" | "HFO1336MZZ(E)" => Ok(LibraryFluid::R1336mzzE),
            "R170" | "ETHANE" => Ok(LibraryFluid::R170),
            "R290" | "PROPANE" | "NPROPANE" => Ok(LibraryFluid::R290),
            "R600" | "BUTANE" | "NBUTANE" => Ok(LibraryFluid::R600),
            "R600A" | "ISOBUTANE" => Ok(LibraryFluid::R600a),
            "R601" | "PENTANE" | "NPENTANE" => Ok(LibraryFluid::R601),
            "R601A" | "ISOPENTANE" => Ok(LibraryFluid::R601a),
            "R1150" | "ETHYLENE" => Ok(LibraryFluid::R1150),
            "R1270" | "PROPYLENE" | "PROPENE" => Ok(LibraryFluid::R1270),
            "R717" | "AMMONIA" | "NH3" => Ok(LibraryFluid::R717),
            "R718" | "WATER" | "H2O" => Ok(LibraryFluid::R718),
            "R744" | "CO2" | "CARBONDIOXIDE" => Ok(LibraryFluid::R744),
            "R764" | "SO2" | "SULFURDIOXIDE" => Ok(LibraryFluid::R764),
            _ => Err("unknown library refrigerant"),
        }
    }
}

/// How a refrigerant's properties are resolved.
///
/// Decided once when the refrigerant is identified and never changed afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Backing {
    /// Reference property library (real-gas equation of state).
    Library(LibraryFluid),
    /// Linearly interpolated tabulated dataset.
    Table,
}

/// Identity of the refrigerant a request is about.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Refrigerant {
    id: String,
    backing: Backing,
}

impl Refrigerant {
    /// Library-backed refrigerant, identified by its canonical key.
    pub fn library(fluid: LibraryFluid) -> Self {
        Self {
            id: fluid.key().to_string(),
            backing: Backing::Library(fluid),
        }
    }

    /// Table-backed refrigerant (custom blend).
    pub fn table(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            backing: Backing::Table,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn backing(&self) -> Backing {
        self.backing
    }

    pub fn is_table_backed(&self) -> bool {
        matches!(self.backing, Backing::Table)
    }
}

impl fmt::Display for Refrigerant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}
