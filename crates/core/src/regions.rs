//! Static region table and district prefix lookup.
//!
//! The form fills amphoe, province, zipcode and type from the chosen
//! district. Lookups are a binary search over the table sorted by district
//! name, so a prefix selects one contiguous run.

use std::sync::LazyLock;

use serde::Serialize;

/// Maximum number of suggestions returned for one prefix.
pub const MAX_SUGGESTIONS: usize = 10;

/// One subdistrict row of the reference table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Region {
    pub district: &'static str,
    pub amphoe: &'static str,
    pub province: &'static str,
    pub zipcode: u32,
    #[serde(rename = "type")]
    pub region_type: &'static str,
}

/// District prefix index over a fixed set of regions.
#[derive(Debug, Clone)]
pub struct RegionIndex {
    regions: Vec<Region>,
}

static EMBEDDED: LazyLock<RegionIndex> = LazyLock::new(|| RegionIndex::new(REGIONS.to_vec()));

impl RegionIndex {
    /// Build an index; rows are sorted by district, keeping input order
    /// among equal names.
    pub fn new(mut regions: Vec<Region>) -> Self {
        regions.sort_by(|a, b| a.district.cmp(b.district));
        Self { regions }
    }

    /// The index over the built-in region table.
    pub fn embedded() -> &'static RegionIndex {
        &EMBEDDED
    }

    /// Up to [`MAX_SUGGESTIONS`] regions whose district starts with `prefix`
    /// (case-sensitive). An empty prefix yields nothing.
    pub fn suggest(&self, prefix: &str) -> &[Region] {
        if prefix.is_empty() {
            return &[];
        }
        let start = self
            .regions
            .partition_point(|r| r.district < prefix);
        let len = self.regions[start..]
            .iter()
            .take(MAX_SUGGESTIONS)
            .take_while(|r| r.district.starts_with(prefix))
            .count();
        &self.regions[start..start + len]
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

const fn region(
    district: &'static str,
    amphoe: &'static str,
    province: &'static str,
    zipcode: u32,
    region_type: &'static str,
) -> Region {
    Region {
        district,
        amphoe,
        province,
        zipcode,
        region_type,
    }
}

/// Built-in reference table.
static REGIONS: &[Region] = &[
    // Bangkok, Phra Nakhon
    region("Phra Borom Maha Ratchawang", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Wang Burapha Phirom", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Wat Ratchabophit", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Samran Rat", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("San Chao Pho Suea", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Sao Chingcha", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Bowon Niwet", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Talat Yot", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Chana Songkhram", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Ban Phan Thom", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Bang Khun Phrom", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    region("Wat Sam Phraya", "Phra Nakhon", "Bangkok", 10200, "khwaeng"),
    // Bangkok, Pathum Wan
    region("Rong Mueang", "Pathum Wan", "Bangkok", 10330, "khwaeng"),
    region("Wang Mai", "Pathum Wan", "Bangkok", 10330, "khwaeng"),
    region("Pathum Wan", "Pathum Wan", "Bangkok", 10330, "khwaeng"),
    region("Lumphini", "Pathum Wan", "Bangkok", 10330, "khwaeng"),
    // Bangkok, Bang Rak
    region("Maha Phruettharam", "Bang Rak", "Bangkok", 10500, "khwaeng"),
    region("Si Lom", "Bang Rak", "Bangkok", 10500, "khwaeng"),
    region("Suriyawong", "Bang Rak", "Bangkok", 10500, "khwaeng"),
    region("Bang Rak", "Bang Rak", "Bangkok", 10500, "khwaeng"),
    region("Si Phraya", "Bang Rak", "Bangkok", 10500, "khwaeng"),
    // Chiang Mai, Mueang Chiang Mai
    region("Si Phum", "Mueang Chiang Mai", "Chiang Mai", 50200, "tambon"),
    region("Phra Sing", "Mueang Chiang Mai", "Chiang Mai", 50200, "tambon"),
    region("Hai Ya", "Mueang Chiang Mai", "Chiang Mai", 50100, "tambon"),
    region("Chang Moi", "Mueang Chiang Mai", "Chiang Mai", 50300, "tambon"),
    region("Chang Khlan", "Mueang Chiang Mai", "Chiang Mai", 50100, "tambon"),
    region("Wat Ket", "Mueang Chiang Mai", "Chiang Mai", 50000, "tambon"),
    region("Chang Phueak", "Mueang Chiang Mai", "Chiang Mai", 50300, "tambon"),
    region("Suthep", "Mueang Chiang Mai", "Chiang Mai", 50200, "tambon"),
    region("Mae Hia", "Mueang Chiang Mai", "Chiang Mai", 50100, "tambon"),
    region("Pa Daet", "Mueang Chiang Mai", "Chiang Mai", 50100, "tambon"),
    region("Nong Hoi", "Mueang Chiang Mai", "Chiang Mai", 50000, "tambon"),
    region("Tha Sala", "Mueang Chiang Mai", "Chiang Mai", 50000, "tambon"),
    region("Nong Pa Khrang", "Mueang Chiang Mai", "Chiang Mai", 50000, "tambon"),
    region("Fa Ham", "Mueang Chiang Mai", "Chiang Mai", 50000, "tambon"),
    region("Pa Tan", "Mueang Chiang Mai", "Chiang Mai", 50300, "tambon"),
    region("San Phi Suea", "Mueang Chiang Mai", "Chiang Mai", 50300, "tambon"),
    // Phuket
    region("Talat Yai", "Mueang Phuket", "Phuket", 83000, "tambon"),
    region("Talat Nuea", "Mueang Phuket", "Phuket", 83000, "tambon"),
    region("Ko Kaeo", "Mueang Phuket", "Phuket", 83000, "tambon"),
    region("Ratsada", "Mueang Phuket", "Phuket", 83000, "tambon"),
    region("Wichit", "Mueang Phuket", "Phuket", 83000, "tambon"),
    region("Chalong", "Mueang Phuket", "Phuket", 83130, "tambon"),
    region("Rawai", "Mueang Phuket", "Phuket", 83130, "tambon"),
    region("Karon", "Mueang Phuket", "Phuket", 83100, "tambon"),
    region("Kathu", "Kathu", "Phuket", 83120, "tambon"),
    region("Patong", "Kathu", "Phuket", 83150, "tambon"),
    region("Kamala", "Kathu", "Phuket", 83150, "tambon"),
    // Khon Kaen, Mueang Khon Kaen
    region("Nai Mueang", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Samran", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Khok Si", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Tha Phra", "Mueang Khon Kaen", "Khon Kaen", 40260, "tambon"),
    region("Ban Thum", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Mueang Kao", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Phra Lap", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Sila", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Ban Pet", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Ban Kho", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Ban Wa", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
    region("Don Han", "Mueang Khon Kaen", "Khon Kaen", 40000, "tambon"),
];
