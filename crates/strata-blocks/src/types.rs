use serde::{Deserialize, Serialize};

/// Every block the engine knows about. Stored one byte per cell in chunk grids.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockKind {
    #[default]
    Air = 0,
    Bedrock,
    Stone,
    Dirt,
    Grass,
    Sand,
    Glass,
    TreeTrunk,
    Leaves,
    Planks,
    Brick,
    Fence,
    DoorLower,
    DoorUpper,
}

/// Static per-kind properties. Indexed by `BlockKind as usize`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BlockProps {
    pub name: &'static str,
    /// Occupies its cell for collision and face culling.
    pub solid: bool,
    /// Can be picked by the raycaster.
    pub targetable: bool,
    /// Default hits to break; `None` means unbreakable.
    pub break_hits: Option<u32>,
    pub color: [u8; 4],
}

const fn props(
    name: &'static str,
    solid: bool,
    break_hits: Option<u32>,
    color: [u8; 4],
) -> BlockProps {
    BlockProps {
        name,
        solid,
        targetable: solid,
        break_hits,
        color,
    }
}

static PROPS: [BlockProps; BlockKind::COUNT] = [
    props("air", false, None, [0, 0, 0, 0]),
    props("bedrock", true, None, [40, 40, 44, 255]),
    props("stone", true, Some(6), [125, 125, 125, 255]),
    props("dirt", true, Some(3), [134, 96, 67, 255]),
    props("grass", true, Some(3), [95, 159, 53, 255]),
    props("sand", true, Some(2), [219, 207, 163, 255]),
    props("glass", true, Some(2), [200, 230, 240, 110]),
    props("tree_trunk", true, Some(5), [102, 81, 51, 255]),
    props("leaves", true, Some(1), [60, 130, 40, 220]),
    props("planks", true, Some(4), [162, 130, 78, 255]),
    props("brick", true, Some(8), [150, 74, 60, 255]),
    props("fence", true, Some(4), [140, 110, 70, 255]),
    props("door_lower", true, Some(3), [120, 90, 55, 255]),
    props("door_upper", true, Some(3), [120, 90, 55, 255]),
];

impl BlockKind {
    pub const COUNT: usize = 14;

    pub const ALL: [BlockKind; BlockKind::COUNT] = [
        BlockKind::Air,
        BlockKind::Bedrock,
        BlockKind::Stone,
        BlockKind::Dirt,
        BlockKind::Grass,
        BlockKind::Sand,
        BlockKind::Glass,
        BlockKind::TreeTrunk,
        BlockKind::Leaves,
        BlockKind::Planks,
        BlockKind::Brick,
        BlockKind::Fence,
        BlockKind::DoorLower,
        BlockKind::DoorUpper,
    ];

    #[inline]
    pub fn props(self) -> &'static BlockProps {
        &PROPS[self as usize]
    }

    #[inline]
    pub fn name(self) -> &'static str {
        self.props().name
    }

    pub fn from_name(name: &str) -> Option<BlockKind> {
        BlockKind::ALL.into_iter().find(|k| k.name() == name)
    }

    #[inline]
    pub fn is_air(self) -> bool {
        self == BlockKind::Air
    }

    #[inline]
    pub fn is_solid(self) -> bool {
        self.props().solid
    }

    #[inline]
    pub fn is_targetable(self) -> bool {
        self.props().targetable
    }

    #[inline]
    pub fn is_door(self) -> bool {
        matches!(self, BlockKind::DoorLower | BlockKind::DoorUpper)
    }

    #[inline]
    pub fn color(self) -> [u8; 4] {
        self.props().color
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
