//! Element kinds, their attribute catalogs, and element records.
//!
//! Every kind owns a fixed, ordered list of attribute slots. The first slot
//! is the length slot for kinds that have a length (`L`, or `LRAD` for
//! multipoles). `Matrix` has no named slots; it carries two dense tensors
//! of expression slots instead.

use std::f64::consts::PI;
use std::fmt;

use bitflags::bitflags;

use crate::{ExprId, Name, SourcePos};

/// Dimension of the transfer-map tensors.
pub const MATRIX_DIM: usize = 6;

/// The closed set of element kinds.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementKind {
    Marker,
    Drift,
    Sbend,
    Rbend,
    Quadrupole,
    Sextupole,
    Octupole,
    Multipole,
    Solenoid,
    HKicker,
    VKicker,
    Kicker,
    RFCavity,
    ElSeparator,
    HMonitor,
    VMonitor,
    Monitor,
    Instrument,
    ECollimator,
    RCollimator,
    YRot,
    SRot,
    BeamBeam,
    Matrix,
    Lump,
}

bitflags! {
    /// A set of element kinds, for filtering and kind-group checks.
    #[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
    pub struct KindSet: u32 {
        const MARKER = 1 << 0;
        const DRIFT = 1 << 1;
        const SBEND = 1 << 2;
        const RBEND = 1 << 3;
        const QUADRUPOLE = 1 << 4;
        const SEXTUPOLE = 1 << 5;
        const OCTUPOLE = 1 << 6;
        const MULTIPOLE = 1 << 7;
        const SOLENOID = 1 << 8;
        const HKICKER = 1 << 9;
        const VKICKER = 1 << 10;
        const KICKER = 1 << 11;
        const RFCAVITY = 1 << 12;
        const ELSEPARATOR = 1 << 13;
        const HMONITOR = 1 << 14;
        const VMONITOR = 1 << 15;
        const MONITOR = 1 << 16;
        const INSTRUMENT = 1 << 17;
        const ECOLLIMATOR = 1 << 18;
        const RCOLLIMATOR = 1 << 19;
        const YROT = 1 << 20;
        const SROT = 1 << 21;
        const BEAMBEAM = 1 << 22;
        const MATRIX = 1 << 23;
        const LUMP = 1 << 24;

        const BENDS = Self::SBEND.bits() | Self::RBEND.bits();
        const KICKERS = Self::HKICKER.bits() | Self::VKICKER.bits();
        const MONITORS = Self::HMONITOR.bits()
            | Self::VMONITOR.bits()
            | Self::MONITOR.bits()
            | Self::INSTRUMENT.bits();
        const COLLIMATORS = Self::ECOLLIMATOR.bits() | Self::RCOLLIMATOR.bits();
        const ROTATIONS = Self::YROT.bits() | Self::SROT.bits();
        /// Kinds without a physical length slot.
        const THIN = Self::MARKER.bits()
            | Self::ROTATIONS.bits()
            | Self::BEAMBEAM.bits()
            | Self::MATRIX.bits()
            | Self::LUMP.bits();
    }
}

const NO_SLOTS: &[&str] = &[];
const LENGTH_ONLY: &[&str] = &["L"];
const BEND_SLOTS: &[&str] = &[
    "L", "ANGLE", "K1", "E1", "E2", "TILT", "K2", "H1", "H2", "HGAP", "FINT", "K3",
];
const QUADRUPOLE_SLOTS: &[&str] = &["L", "K1", "TILT"];
const SEXTUPOLE_SLOTS: &[&str] = &["L", "K2", "TILT"];
const OCTUPOLE_SLOTS: &[&str] = &["L", "K3", "TILT"];
const MULTIPOLE_SLOTS: &[&str] = &[
    "LRAD", "K0L", "T0", "K1L", "T1", "K2L", "T2", "K3L", "T3", "K4L", "T4", "K5L", "T5", "K6L",
    "T6", "K7L", "T7", "K8L", "T8", "K9L", "T9",
];
const SOLENOID_SLOTS: &[&str] = &["L", "KS"];
const KICKER_SLOTS: &[&str] = &["L", "KICK", "TILT"];
const HV_KICKER_SLOTS: &[&str] = &["L", "HKICK", "VKICK", "TILT"];
const RFCAVITY_SLOTS: &[&str] = &[
    "L", "VOLT", "LAG", "HARMON", "BETRF", "PG", "SHUNT", "TFILL",
];
const ELSEPARATOR_SLOTS: &[&str] = &["L", "E", "TILT"];
const COLLIMATOR_SLOTS: &[&str] = &["L", "XSIZE", "YSIZE"];
const ROTATION_SLOTS: &[&str] = &["ANGLE"];
const BEAMBEAM_SLOTS: &[&str] = &["SIGX", "SIGY", "XMA", "YMA", "CHARGE"];
const LUMP_SLOTS: &[&str] = &["ORDER"];

impl ElementKind {
    pub const ALL: [ElementKind; 25] = [
        ElementKind::Marker,
        ElementKind::Drift,
        ElementKind::Sbend,
        ElementKind::Rbend,
        ElementKind::Quadrupole,
        ElementKind::Sextupole,
        ElementKind::Octupole,
        ElementKind::Multipole,
        ElementKind::Solenoid,
        ElementKind::HKicker,
        ElementKind::VKicker,
        ElementKind::Kicker,
        ElementKind::RFCavity,
        ElementKind::ElSeparator,
        ElementKind::HMonitor,
        ElementKind::VMonitor,
        ElementKind::Monitor,
        ElementKind::Instrument,
        ElementKind::ECollimator,
        ElementKind::RCollimator,
        ElementKind::YRot,
        ElementKind::SRot,
        ElementKind::BeamBeam,
        ElementKind::Matrix,
        ElementKind::Lump,
    ];

    /// The MAD keyword for this kind.
    pub const fn keyword(self) -> &'static str {
        match self {
            ElementKind::Marker => "MARKER",
            ElementKind::Drift => "DRIFT",
            ElementKind::Sbend => "SBEND",
            ElementKind::Rbend => "RBEND",
            ElementKind::Quadrupole => "QUADRUPOLE",
            ElementKind::Sextupole => "SEXTUPOLE",
            ElementKind::Octupole => "OCTUPOLE",
            ElementKind::Multipole => "MULTIPOLE",
            ElementKind::Solenoid => "SOLENOID",
            ElementKind::HKicker => "HKICKER",
            ElementKind::VKicker => "VKICKER",
            ElementKind::Kicker => "KICKER",
            ElementKind::RFCavity => "RFCAVITY",
            ElementKind::ElSeparator => "ELSEPARATOR",
            ElementKind::HMonitor => "HMONITOR",
            ElementKind::VMonitor => "VMONITOR",
            ElementKind::Monitor => "MONITOR",
            ElementKind::Instrument => "INSTRUMENT",
            ElementKind::ECollimator => "ECOLLIMATOR",
            ElementKind::RCollimator => "RCOLLIMATOR",
            ElementKind::YRot => "YROT",
            ElementKind::SRot => "SROT",
            ElementKind::BeamBeam => "BEAMBEAM",
            ElementKind::Matrix => "MATRIX",
            ElementKind::Lump => "LUMP",
        }
    }

    /// Case-insensitive lookup by keyword.
    pub fn from_keyword(word: &str) -> Option<Self> {
        let word = word.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.keyword().eq_ignore_ascii_case(word))
    }

    /// This kind as a single-member [`KindSet`].
    pub const fn flag(self) -> KindSet {
        // Discriminants follow declaration order, which matches the bit order.
        KindSet::from_bits_retain(1 << self as u32)
    }

    /// Attribute slots in catalog order.
    pub fn slots(self) -> &'static [&'static str] {
        let flag = self.flag();
        if KindSet::BENDS.contains(flag) {
            return BEND_SLOTS;
        }
        if KindSet::MONITORS.contains(flag) {
            return LENGTH_ONLY;
        }
        if KindSet::KICKERS.contains(flag) {
            return KICKER_SLOTS;
        }
        if KindSet::COLLIMATORS.contains(flag) {
            return COLLIMATOR_SLOTS;
        }
        if KindSet::ROTATIONS.contains(flag) {
            return ROTATION_SLOTS;
        }
        match self {
            ElementKind::Drift => LENGTH_ONLY,
            ElementKind::Quadrupole => QUADRUPOLE_SLOTS,
            ElementKind::Sextupole => SEXTUPOLE_SLOTS,
            ElementKind::Octupole => OCTUPOLE_SLOTS,
            ElementKind::Multipole => MULTIPOLE_SLOTS,
            ElementKind::Solenoid => SOLENOID_SLOTS,
            ElementKind::Kicker => HV_KICKER_SLOTS,
            ElementKind::RFCavity => RFCAVITY_SLOTS,
            ElementKind::ElSeparator => ELSEPARATOR_SLOTS,
            ElementKind::BeamBeam => BEAMBEAM_SLOTS,
            ElementKind::Lump => LUMP_SLOTS,
            _ => NO_SLOTS,
        }
    }

    /// Position of `keyword` in [`slots`](Self::slots).
    pub fn slot_index(self, keyword: &str) -> Option<usize> {
        let keyword = keyword.trim();
        self.slots()
            .iter()
            .position(|slot| slot.eq_ignore_ascii_case(keyword))
    }

    #[inline]
    pub fn has_length(self) -> bool {
        !KindSet::THIN.contains(self.flag())
    }

    /// Keyword of the length slot, if the kind has one.
    pub fn length_keyword(self) -> Option<&'static str> {
        if self.has_length() {
            self.slots().first().copied()
        } else {
            None
        }
    }

    /// Value installed when `keyword` appears as a bare flag.
    ///
    /// Only tilt attributes have one: a fraction of π that depends on the
    /// kind (and on the order, for multipoles).
    pub fn flag_default(self, keyword: &str) -> Option<f64> {
        let keyword = keyword.trim();
        if self == ElementKind::Multipole {
            let order = multipole_tilt_order(keyword)?;
            return Some(PI / f64::from(2 * (order + 1)));
        }
        if !keyword.eq_ignore_ascii_case("TILT") {
            return None;
        }
        match self {
            ElementKind::Sbend | ElementKind::Rbend => Some(PI / 2.0),
            ElementKind::Quadrupole => Some(PI / 4.0),
            ElementKind::Sextupole => Some(PI / 6.0),
            ElementKind::Octupole => Some(PI / 8.0),
            _ => None,
        }
    }
}

/// `T0`..`T9` to the order digit.
fn multipole_tilt_order(keyword: &str) -> Option<u32> {
    match keyword.as_bytes() {
        [t, digit] if t.eq_ignore_ascii_case(&b'T') && digit.is_ascii_digit() => {
            Some(u32::from(digit - b'0'))
        }
        _ => None,
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A validated, zero-based tensor index.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum MatrixIndex {
    /// First-order map entry `RM(i, j)`.
    Rm(usize, usize),
    /// Second-order map entry `TM(i, j, k)`.
    Tm(usize, usize, usize),
}

impl MatrixIndex {
    /// Fold one raw, 1-based index: add `1e-6`, truncate, check `1..=6`.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "range checked before the cast"
    )]
    pub fn fold(raw: f64) -> Option<usize> {
        let index = (raw + 1.0e-6).trunc();
        if (1.0..=6.0).contains(&index) {
            Some(index as usize - 1)
        } else {
            None
        }
    }

    pub fn rm(i: f64, j: f64) -> Option<Self> {
        Some(MatrixIndex::Rm(Self::fold(i)?, Self::fold(j)?))
    }

    pub fn tm(i: f64, j: f64, k: f64) -> Option<Self> {
        Some(MatrixIndex::Tm(Self::fold(i)?, Self::fold(j)?, Self::fold(k)?))
    }
}

impl fmt::Display for MatrixIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            MatrixIndex::Rm(i, j) => write!(f, "RM({},{})", i + 1, j + 1),
            MatrixIndex::Tm(i, j, k) => write!(f, "TM({},{},{})", i + 1, j + 1, k + 1),
        }
    }
}

/// The two expression tensors of a `Matrix` element.
#[derive(Clone, PartialEq, Debug)]
pub struct MatrixTables {
    rm: [[Option<ExprId>; MATRIX_DIM]; MATRIX_DIM],
    tm: [[[Option<ExprId>; MATRIX_DIM]; MATRIX_DIM]; MATRIX_DIM],
}

impl Default for MatrixTables {
    fn default() -> Self {
        MatrixTables {
            rm: [[None; MATRIX_DIM]; MATRIX_DIM],
            tm: [[[None; MATRIX_DIM]; MATRIX_DIM]; MATRIX_DIM],
        }
    }
}

impl MatrixTables {
    pub fn get(&self, index: MatrixIndex) -> Option<ExprId> {
        match index {
            MatrixIndex::Rm(i, j) => self.rm[i][j],
            MatrixIndex::Tm(i, j, k) => self.tm[i][j][k],
        }
    }

    /// Store `expr`, returning the expression it replaced.
    pub fn set(&mut self, index: MatrixIndex, expr: ExprId) -> Option<ExprId> {
        let slot = match index {
            MatrixIndex::Rm(i, j) => &mut self.rm[i][j],
            MatrixIndex::Tm(i, j, k) => &mut self.tm[i][j][k],
        };
        slot.replace(expr)
    }

    /// Every set entry, first-order table first.
    pub fn exprs(&self) -> impl Iterator<Item = ExprId> + '_ {
        let rm = self.rm.iter().flatten();
        let tm = self.tm.iter().flatten().flatten();
        rm.chain(tm).filter_map(|slot| *slot)
    }
}

/// A defined element.
#[derive(Clone, PartialEq, Debug)]
pub struct Element {
    pub name: Name,
    pub kind: ElementKind,
    /// Free-form `TYPE=` label.
    pub label: Option<String>,
    pub pos: SourcePos,
    slots: Vec<Option<ExprId>>,
    matrix: Option<Box<MatrixTables>>,
}

impl Element {
    /// A fresh record with every slot unset.
    pub fn new(name: Name, kind: ElementKind, pos: SourcePos) -> Self {
        let matrix = (kind == ElementKind::Matrix).then(Box::default);
        Element {
            name,
            kind,
            label: None,
            pos,
            slots: vec![None; kind.slots().len()],
            matrix,
        }
    }

    /// The expression in slot `keyword`.
    ///
    /// Outer `None`: the kind has no such slot. Inner `None`: unset.
    pub fn slot(&self, keyword: &str) -> Option<Option<ExprId>> {
        let index = self.kind.slot_index(keyword)?;
        self.slots.get(index).copied()
    }

    /// Store `expr` in slot `index`, returning the expression it replaced.
    pub fn set_slot(&mut self, index: usize, expr: ExprId) -> Option<ExprId> {
        self.slots.get_mut(index).and_then(|slot| slot.replace(expr))
    }

    /// The length expression, if the kind has a length and it is set.
    pub fn length(&self) -> Option<ExprId> {
        if self.kind.has_length() {
            self.slots.first().copied().flatten()
        } else {
            None
        }
    }

    /// `(keyword, expr)` for every slot in catalog order.
    pub fn slots(&self) -> impl Iterator<Item = (&'static str, Option<ExprId>)> + '_ {
        self.kind.slots().iter().copied().zip(self.slots.iter().copied())
    }

    pub fn matrix(&self) -> Option<&MatrixTables> {
        self.matrix.as_deref()
    }

    pub fn matrix_mut(&mut self) -> Option<&mut MatrixTables> {
        self.matrix.as_deref_mut()
    }

    /// `NAME:LABEL`, falling back to the kind keyword when no label is set.
    pub fn qualified_name(&self) -> String {
        match &self.label {
            Some(label) => format!("{}:{label}", self.name),
            None => format!("{}:{}", self.name, self.kind),
        }
    }

    /// Every expression this record owns.
    pub fn owned_exprs(&self) -> Vec<ExprId> {
        let mut owned: Vec<ExprId> = self.slots.iter().filter_map(|slot| *slot).collect();
        if let Some(matrix) = &self.matrix {
            owned.extend(matrix.exprs());
        }
        owned
    }
}
