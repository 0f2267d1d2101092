//! Built-in levels
//!
//! Each level is an ASCII grid; see `sim::level` for the legend. Extra levels
//! can be loaded from text files with `load_level_file`.

use std::fs;
use std::path::Path;

use crate::error::{PlatformerError, Result};

/// Introduction
pub const LEVEL_1: &str = "\
------------------------------------------------------------\n\
------------------------------------------------------------\n\
------------------------------------------------------------\n\
------------------------------------------------------------\n\
-------------------------------B----------------------------\n\
------------------------------BBB---------------------------\n\
---------B-----------------------------------------E--------\n\
--------BBB---------------------------B---------------------\n\
P--------------------E----------------BBB-------------------\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXX---XXXXXXXXXXXXXXXXXXXXXXXXXX--\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXX-E-XXXXXXXXXXXXXXXXXXXXXXXXXXG-\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX-";

/// Gaps and low platforms
pub const LEVEL_2: &str = "\
------------------------------------------------------------\n\
----------------------BBB---------------BBB-----------------\n\
--------------------BBBBB--E-----E----BBBBB----------------\n\
-----------------BBB------BBB---BBB------BBB----E----------\n\
--------------BBB------------------------------BBBB--------\n\
---------BBB------------------BBB------E-------------BBB--G\n\
P---------------E---------BBB---------BBB------------------\n\
XXXXXXX------XXXXXXXXXXXX------XXXXXXXXXXXX------XXXXXXX---\n\
XXXXXX--------XXXXXXXXXXX------XXXXXXXXXXXXX------XXXXXX---\n\
XXXXX----------XXXXXXXXXX------XXXXXXXXXXXX--------XXXXX---\n\
XXXX------------XXXXXXXXX------XXXXXXXXXXX----------XXXX---\n\
XXX--------------XXXXXXXX------XXXXXXXXXX------------XXX---";

/// Platform finale
pub const LEVEL_3: &str = "\
------------------------------------------------------------\n\
------------------------B-----------------------------------\n\
-----------------------BBB---------------------E------------\n\
----------------------BBBBB---------------------------------\n\
-----------------B--------------B---------------------------\n\
----------------BBB------------BBB-------------------------G\n\
P------------------------------E-E---E---EEE----E--E--E-----\n\
XXXXXXXXXXXXXXXXXXXXXXXX---XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX---\n\
XXXXXXXXXXXXXXXXXXXXXXXX---XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX---\n\
XXXXXXXXXXXXXXXXXXXXXXXX---XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX---\n\
XXXXXXXXXXXXXXXXXXXXXXXX---XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX---\n\
XXXXXXXXXXXXXXXXXXXXXXXX---XXXXXXXXXXXXXXXXXXXXXXXXXXXXXX---";

/// More enemies, precise jumps
pub const LEVEL_4: &str = "\
------------------------------------------------------------\n\
---------------------B---------------------B-----------------\n\
--------------------BBB-------------------BBB----------------\n\
-------------------BBBBB-----------------BBBBB---------------\n\
----------E--------------------E-------------------E---------\n\
-----------------B-------------------B---------------------G-\n\
P-----------------------------------------------------------\n\
XXXXXX---XXXXXXXXXXXX-----XXXXXXXXXXXX-----XXXXXXXXXXXX---XXX\n\
XXXXXX---XXXXXXXXXXXX-----XXXXXXXXXXXX-----XXXXXXXXXXXX---XXX\n\
XXXXXX---XXXXXXXXXXXX-----XXXXXXXXXXXX-----XXXXXXXXXXXX---XXX\n\
XXXXXX---XXXXXXXXXXXX-----XXXXXXXXXXXX-----XXXXXXXXXXXX---XXX\n\
XXXXXX-f-XXXXXXXXXXXX---f-XXXXXXXXXXXX-f---XXXXXXXXXXXX-F-XXX";

/// Sky platforms and enemy chains
pub const LEVEL_5: &str = "\
------------------------------------------------------------\n\
----------------B------------------------------B------------\n\
---------------BBB------------E---------------BBB-----------\n\
--------------BBBBB--------------------------BBBBB----------\n\
---------B-----------------------------B--------------------\n\
--------BBB-----------E--------------BBB-------------------G\n\
P--------E--------------E-----------E------E-------------EE-\n\
XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX\n\
XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX\n\
XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX\n\
XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX---XXXX\n\
XXXX-f-XXXX-f-XXXX-f-XXXX-F-XXXX-f-XXXX-f-XXXX-f-XXXX-F-XXXX";

/// Boss arena
pub const LEVEL_6: &str = "\
------------------------------------------------------------\n\
------------------------------------------------------------\n\
------------------------B-----------------------------------\n\
-----------------------BBB----------------------------------\n\
----------------------BBBBB---------------------------------\n\
--------------------BB-----BBK-----------------------------G\n\
P-----------------------------------------------------------\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX\n\
XXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXXX";

/// All built-in levels in play order
pub const BUILTIN_LEVELS: [&str; 6] = [LEVEL_1, LEVEL_2, LEVEL_3, LEVEL_4, LEVEL_5, LEVEL_6];

pub fn builtin_levels() -> Vec<String> {
    BUILTIN_LEVELS.iter().map(|s| s.to_string()).collect()
}

/// Read a level from a text file. Surrounding blank lines are dropped;
/// a file with no rows is rejected.
pub fn load_level_file(path: &Path) -> Result<String> {
    let text = fs::read_to_string(path)?;
    let trimmed = text.trim_matches(|c| c == '\n' || c == '\r');
    if trimmed.trim().is_empty() {
        return Err(PlatformerError::InvalidLevel(format!(
            "{} has no rows",
            path.display()
        )));
    }
    log::debug!("Read level file {}", path.display());
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{SimRng, TileLevel};

    #[test]
    fn test_builtin_levels_parse() {
        let mut rng = SimRng::new(1);
        for (i, text) in BUILTIN_LEVELS.iter().enumerate() {
            let level = TileLevel::parse(text, &mut rng);
            assert_eq!(level.map.height(), 12, "level {}", i + 1);
            assert!(level.map.width() >= 60, "level {}", i + 1);
            // Player starts on the left edge, one row above the ground
            assert_eq!(level.player_start.x, 2.0, "level {}", i + 1);
        }
    }

    #[test]
    fn test_only_last_level_has_boss() {
        let mut rng = SimRng::new(1);
        let bosses: Vec<bool> = BUILTIN_LEVELS
            .iter()
            .map(|t| TileLevel::parse(t, &mut rng).boss.is_some())
            .collect();
        assert_eq!(bosses, vec![false, false, false, false, false, true]);
    }

    #[test]
    fn test_emitters_in_pit_levels() {
        let mut rng = SimRng::new(1);
        let level4 = TileLevel::parse(LEVEL_4, &mut rng);
        assert_eq!(level4.emitters().len(), 4);
        let level1 = TileLevel::parse(LEVEL_1, &mut rng);
        assert!(level1.emitters().is_empty());
    }

    #[test]
    fn test_load_level_file() {
        let path = std::env::temp_dir()
            .join(format!("retro-platformer-level-{}.txt", std::process::id()));
        fs::write(&path, "\n-P-\nXXX\n\n").unwrap();
        assert_eq!(load_level_file(&path).unwrap(), "-P-\nXXX");

        fs::write(&path, "\n\n").unwrap();
        assert!(matches!(load_level_file(&path), Err(PlatformerError::InvalidLevel(_))));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_level_file() {
        let result = load_level_file(Path::new("/no/such/level.txt"));
        assert!(matches!(result, Err(PlatformerError::Io(_))));
    }
}
