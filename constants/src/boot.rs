/// Total time spent revealing the boot script, spread evenly across its lines.
pub const BOOT_TOTAL_DURATION_MS: u64 = 2000;

/// Pause after the last line before handing off to the gate.
pub const BOOT_TRAILING_PAUSE_MS: u64 = 400;

pub const BOOT_FONT_SIZE: f32 = 13.0;

pub const BOOT_SCRIPT: &[&str] = &[
    "Initializing sequence ALGORITHM... [INTACT]",
    "Checking machine engine status... [UPDATED]",
    "Verifying Graphics thermal levels... [MODERATE]",
    "Loading the Boot loader diagnostics... [DONE]",
    "Establishing communication link... [OK]",
    "Calibrating navigation systems... [OK]",
    "Testing the CPCFTG controls... [OK]",
    "Activating guidance computer... [DONE]",
    "Securing payload bay... [SECURED]",
    "CONTROL NAV_LINK systems check... [DONE]",
    "Final wiring check... [NORMAL]",
    "AI ready for the COLD launch.",
    "BOOT-LOADING 10%.. 9%.. 8%.. 7%.. 6%.. 5%.. 4%.. 3%.. 2%.. 1%.. 0%..",
    "ARE YOU READY?FOR THE ---PORFOLIO---",
    "-----IBM-75.23.65.3.4.32.84----SYSTEM-READY--------------BOOTING-UP-...----------WORKING---------------",
];
