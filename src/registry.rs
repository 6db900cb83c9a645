//! Mode registry
//!
//! Maps an 8-bit mode id to its display name and effect routine. Built-in
//! modes occupy the low ids; the custom slots after them can be filled at
//! runtime.

use crate::color::{CANDY, CHRISTMAS, COOL, NATURE, WARM};
use crate::effect::{
    EffectFn, basic, chase, fire, idle_effect, physics, rainbow, scanner, twinkle, wipe,
};
use crate::segment::ConfigStatus;

/// Number of built-in modes
pub const BUILTIN_MODE_COUNT: usize = 106;
/// Number of runtime-assignable slots after the built-ins
pub const MAX_CUSTOM_MODES: usize = 16;
/// Total number of mode ids
pub const MODE_COUNT: usize = BUILTIN_MODE_COUNT + MAX_CUSTOM_MODES;

const CUSTOM_NAMES: [&str; MAX_CUSTOM_MODES] = [
    "Custom 0", "Custom 1", "Custom 2", "Custom 3", "Custom 4", "Custom 5", "Custom 6",
    "Custom 7", "Custom 8", "Custom 9", "Custom 10", "Custom 11", "Custom 12", "Custom 13",
    "Custom 14", "Custom 15",
];

/// Mode identifier.
///
/// Always below [`MODE_COUNT`]; the constructors clamp or reject anything
/// larger.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ModeId(u8);

#[allow(clippy::cast_possible_truncation)]
impl ModeId {
    /// Last valid id
    pub const LAST: Self = Self((MODE_COUNT - 1) as u8);

    pub const fn from_raw(value: u8) -> Option<Self> {
        if (value as usize) < MODE_COUNT {
            Some(Self(value))
        } else {
            None
        }
    }

    /// Id for `value`, clamped to the last mode
    pub const fn clamped(value: u8) -> Self {
        match Self::from_raw(value) {
            Some(id) => id,
            None => Self::LAST,
        }
    }

    /// Id of custom slot `index`, clamped to the last slot
    pub const fn custom(index: u8) -> Self {
        let index = if (index as usize) < MAX_CUSTOM_MODES {
            index
        } else {
            (MAX_CUSTOM_MODES - 1) as u8
        };
        Self(BUILTIN_MODE_COUNT as u8 + index)
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    pub const fn is_custom(self) -> bool {
        self.0 as usize >= BUILTIN_MODE_COUNT
    }
}

macro_rules! builtin_modes {
    ($($id:literal => $konst:ident, $name:literal, $effect:expr;)*) => {
        impl ModeId {
            $(
                #[doc = $name]
                pub const $konst: Self = Self($id);
            )*
        }

        const BUILTIN_NAMES: [&str; BUILTIN_MODE_COUNT] = [$($name),*];
        const BUILTIN_EFFECTS: [EffectFn; BUILTIN_MODE_COUNT] = [$($effect),*];
    };
}

builtin_modes! {
    0 => STATIC, "Static", basic::static_color;
    1 => BLINK, "Blink", basic::blink;
    2 => BREATH, "Breath", basic::breath;
    3 => COLOR_WIPE, "Color Wipe", wipe::wipe;
    4 => COLOR_WIPE_INV, "Color Wipe Inverse", wipe::wipe_inverse;
    5 => COLOR_WIPE_REV, "Color Wipe Reverse", wipe::wipe_reverse;
    6 => COLOR_WIPE_REV_INV, "Color Wipe Reverse Inverse", wipe::wipe_reverse_inverse;
    7 => COLOR_WIPE_RANDOM, "Color Wipe Random", wipe::wipe_random;
    8 => RANDOM_COLOR, "Random Color", basic::random_color;
    9 => SINGLE_DYNAMIC, "Single Dynamic", basic::single_dynamic;
    10 => MULTI_DYNAMIC, "Multi Dynamic", basic::multi_dynamic;
    11 => RAINBOW, "Rainbow", rainbow::rainbow;
    12 => RAINBOW_CYCLE, "Rainbow Cycle", rainbow::rainbow_cycle;
    13 => COOL_CYCLE, "Cool Cycle", rainbow::scheme_cycle::<{ COOL }>;
    14 => WARM_CYCLE, "Warm Cycle", rainbow::scheme_cycle::<{ WARM }>;
    15 => NATURE_CYCLE, "Nature Cycle", rainbow::scheme_cycle::<{ NATURE }>;
    16 => CANDY_CYCLE, "Candy Cycle", rainbow::scheme_cycle::<{ CANDY }>;
    17 => CHRISTMAS_CYCLE, "Christmas Cycle", rainbow::scheme_cycle::<{ CHRISTMAS }>;
    18 => SCAN, "Scan", wipe::single_scan;
    19 => DUAL_SCAN, "Dual Scan", wipe::dual_scan;
    20 => FADE, "Fade", basic::fade;
    21 => THEATER_CHASE, "Theater Chase", chase::theater_chase;
    22 => THEATER_CHASE_RAINBOW, "Theater Chase Rainbow", chase::theater_chase_rainbow;
    23 => THEATER_CHASE_COOL, "Theater Chase Cool", chase::theater_chase_scheme::<{ COOL }>;
    24 => THEATER_CHASE_WARM, "Theater Chase Warm", chase::theater_chase_scheme::<{ WARM }>;
    25 => THEATER_CHASE_NATURE, "Theater Chase Nature", chase::theater_chase_scheme::<{ NATURE }>;
    26 => THEATER_CHASE_CANDY, "Theater Chase Candy", chase::theater_chase_scheme::<{ CANDY }>;
    27 => THEATER_CHASE_CHRISTMAS, "Theater Chase Christmas", chase::theater_chase_scheme::<{ CHRISTMAS }>;
    28 => RUNNING_LIGHTS, "Running Lights", chase::running_lights;
    29 => TWINKLE, "Twinkle", twinkle::twinkle_color;
    30 => TWINKLE_RAINBOW, "Twinkle Rainbow", twinkle::twinkle_rainbow;
    31 => TWINKLE_COOL, "Twinkle Cool", twinkle::twinkle_scheme::<{ COOL }>;
    32 => TWINKLE_WARM, "Twinkle Warm", twinkle::twinkle_scheme::<{ WARM }>;
    33 => TWINKLE_NATURE, "Twinkle Nature", twinkle::twinkle_scheme::<{ NATURE }>;
    34 => TWINKLE_CANDY, "Twinkle Candy", twinkle::twinkle_scheme::<{ CANDY }>;
    35 => TWINKLE_CHRISTMAS, "Twinkle Christmas", twinkle::twinkle_scheme::<{ CHRISTMAS }>;
    36 => TWINKLE_RANDOM, "Twinkle Random", twinkle::twinkle_random;
    37 => TWINKLE_FADE, "Twinkle Fade", twinkle::twinkle_fade_color;
    38 => TWINKLE_FADE_RANDOM, "Twinkle Fade Random", twinkle::twinkle_fade_random;
    39 => SPARKLE, "Sparkle", twinkle::sparkle_color;
    40 => SNOW_SPARKLE, "Snow Sparkle", twinkle::snow_sparkle;
    41 => FLASH_SPARKLE, "Flash Sparkle", twinkle::flash_sparkle;
    42 => HYPER_SPARKLE, "Hyper Sparkle", twinkle::hyper_sparkle;
    43 => STROBE, "Strobe", basic::strobe;
    44 => STROBE_RAINBOW, "Strobe Rainbow", basic::strobe_rainbow;
    45 => STROBE_COOL, "Strobe Cool", basic::strobe_scheme::<{ COOL }>;
    46 => STROBE_WARM, "Strobe Warm", basic::strobe_scheme::<{ WARM }>;
    47 => STROBE_NATURE, "Strobe Nature", basic::strobe_scheme::<{ NATURE }>;
    48 => STROBE_CANDY, "Strobe Candy", basic::strobe_scheme::<{ CANDY }>;
    49 => STROBE_CHRISTMAS, "Strobe Christmas", basic::strobe_scheme::<{ CHRISTMAS }>;
    50 => MULTI_STROBE, "Multi Strobe", basic::multi_strobe;
    51 => BLINK_RAINBOW, "Blink Rainbow", basic::blink_rainbow;
    52 => BLINK_COOL, "Blink Cool", basic::blink_scheme::<{ COOL }>;
    53 => BLINK_WARM, "Blink Warm", basic::blink_scheme::<{ WARM }>;
    54 => BLINK_NATURE, "Blink Nature", basic::blink_scheme::<{ NATURE }>;
    55 => BLINK_CANDY, "Blink Candy", basic::blink_scheme::<{ CANDY }>;
    56 => BLINK_CHRISTMAS, "Blink Christmas", basic::blink_scheme::<{ CHRISTMAS }>;
    57 => CHASE_RANDOM, "Chase Random", chase::chase_random;
    58 => CHASE_RAINBOW, "Chase Rainbow", chase::chase_rainbow;
    59 => CHASE_COOL, "Chase Cool", chase::chase_scheme::<{ COOL }>;
    60 => CHASE_WARM, "Chase Warm", chase::chase_scheme::<{ WARM }>;
    61 => CHASE_NATURE, "Chase Nature", chase::chase_scheme::<{ NATURE }>;
    62 => CHASE_CANDY, "Chase Candy", chase::chase_scheme::<{ CANDY }>;
    63 => CHASE_CHRISTMAS, "Chase Christmas", chase::chase_scheme::<{ CHRISTMAS }>;
    64 => CHASE_WHITE, "Chase White", chase::chase_white;
    65 => CHASE_COLOR, "Chase Color", chase::chase_color;
    66 => CHASE_FLASH, "Chase Flash", chase::chase_flash;
    67 => CHASE_FLASH_RANDOM, "Chase Flash Random", chase::chase_flash_random;
    68 => CHASE_RAINBOW_WHITE, "Chase Rainbow White", chase::chase_rainbow_white;
    69 => CHASE_BLACKOUT, "Chase Blackout", chase::chase_blackout;
    70 => CHASE_BLACKOUT_RAINBOW, "Chase Blackout Rainbow", chase::chase_blackout_rainbow;
    71 => COLOR_SWEEP_RANDOM, "Color Sweep Random", wipe::sweep_random;
    72 => RUNNING_COLOR, "Running Color", chase::running_color;
    73 => RUNNING_RED_BLUE, "Running Red Blue", chase::running_red_blue;
    74 => RUNNING_RANDOM, "Running Random", chase::running_random;
    75 => LARSON_SCANNER, "Larson Scanner", scanner::larson_scanner;
    76 => COMET, "Comet", scanner::comet;
    77 => FIREWORKS, "Fireworks", fire::fireworks_color;
    78 => FIREWORKS_RANDOM, "Fireworks Random", fire::fireworks_random;
    79 => MERRY_CHRISTMAS, "Merry Christmas", chase::merry_christmas;
    80 => FIRE_FLICKER, "Fire Flicker", fire::fire_flicker_normal;
    81 => FIRE_FLICKER_SOFT, "Fire Flicker (soft)", fire::fire_flicker_soft;
    82 => FIRE_FLICKER_INTENSE, "Fire Flicker (intense)", fire::fire_flicker_intense;
    83 => CIRCUS_COMBUSTUS, "Circus Combustus", chase::circus_combustus;
    84 => HALLOWEEN, "Halloween", chase::halloween;
    85 => BICOLOR_CHASE, "Bicolor Chase", chase::bicolor_chase;
    86 => TRICOLOR_CHASE, "Tricolor Chase", chase::tricolor;
    87 => CANDY_CANE, "Candy Cane", chase::candy_cane;
    88 => KITT, "Kitt", scanner::kitt;
    89 => BOUNCING_BALLS, "Bouncing Balls", physics::bouncing_balls_single;
    90 => BOUNCING_COLORED_BALLS, "Bouncing Colored Balls", physics::bouncing_balls_colored;
    91 => BLOCK_DISSOLVE, "Block Dissolve", twinkle::block_dissolve;
    92 => DUAL_LARSON, "Dual Larson", scanner::dual_larson;
    93 => FILLERUP, "Fillerup", physics::filler_up;
    94 => HEARTBEAT, "Heartbeat", basic::heartbeat;
    95 => MULTI_COMET, "Multi-Comet", scanner::multi_comet;
    96 => OSCILLATE, "Oscillate", scanner::oscillate;
    97 => POPCORN, "Popcorn", physics::popcorn;
    98 => RAIN, "Rain", twinkle::rain;
    99 => RAINBOW_FIREWORKS, "Rainbow Fireworks", fire::rainbow_fireworks;
    100 => RAINBOW_LARSON, "Rainbow Larson", scanner::rainbow_larson;
    101 => RANDOM_CHASE, "Random Chase", chase::random_chase;
    102 => TRIFADE, "Trifade", basic::trifade;
    103 => TWINKLE_FOX, "Twinkle Fox", twinkle::twinkle_fox;
    104 => VU_METER, "VU Meter", physics::vu_meter;
    105 => ICU, "ICU", scanner::icu;
}

/// Table of mode names and routines, indexed by [`ModeId`]
pub struct ModeRegistry {
    names: [&'static str; MODE_COUNT],
    effects: [EffectFn; MODE_COUNT],
    custom_count: usize,
}

impl ModeRegistry {
    /// Registry with every built-in mode and all custom slots idle
    pub fn new() -> Self {
        let mut names = [""; MODE_COUNT];
        let mut effects: [EffectFn; MODE_COUNT] = [idle_effect; MODE_COUNT];

        names[..BUILTIN_MODE_COUNT].copy_from_slice(&BUILTIN_NAMES);
        names[BUILTIN_MODE_COUNT..].copy_from_slice(&CUSTOM_NAMES);
        effects[..BUILTIN_MODE_COUNT].copy_from_slice(&BUILTIN_EFFECTS);

        Self {
            names,
            effects,
            custom_count: 0,
        }
    }

    pub const fn count(&self) -> usize {
        MODE_COUNT
    }

    /// Number of custom slots filled by [`Self::register`] or [`Self::set_custom`]
    pub const fn custom_count(&self) -> usize {
        self.custom_count
    }

    pub fn effect(&self, id: ModeId) -> EffectFn {
        self.effects[usize::from(id.raw())]
    }

    pub fn name(&self, id: ModeId) -> &'static str {
        self.names[usize::from(id.raw())]
    }

    #[allow(clippy::cast_possible_truncation)]
    pub fn parse_from_str(&self, name: &str) -> Option<ModeId> {
        self.names
            .iter()
            .position(|candidate| *candidate == name)
            .and_then(|index| ModeId::from_raw(index as u8))
    }

    /// Put `effect` into the next free custom slot.
    ///
    /// When every slot is taken, the last one is overwritten and the
    /// status is [`ConfigStatus::Clamped`].
    #[allow(clippy::cast_possible_truncation)]
    pub fn register(&mut self, name: &'static str, effect: EffectFn) -> (ModeId, ConfigStatus) {
        let full = self.custom_count >= MAX_CUSTOM_MODES;
        let index = self.custom_count.min(MAX_CUSTOM_MODES - 1);
        self.set_custom(index as u8, name, effect);
        (ModeId::custom(index as u8), ConfigStatus::from_clamped(full))
    }

    /// Replace custom slot `index`, clamped to the last slot
    pub fn set_custom(&mut self, index: u8, name: &'static str, effect: EffectFn) -> ConfigStatus {
        let id = ModeId::custom(index);
        let slot = usize::from(id.raw());
        (self.names[slot], self.effects[slot]) = (name, effect);

        let used = slot - BUILTIN_MODE_COUNT + 1;
        self.custom_count = self.custom_count.max(used);
        ConfigStatus::from_clamped(usize::from(index) >= MAX_CUSTOM_MODES)
    }
}

impl Default for ModeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
