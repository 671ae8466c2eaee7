//! Built-in weapon reference data.
//!
//! Names are matched verbatim against the server's kill feed strings
//! (case and punctuation sensitive). Vehicles and their mounted guns are
//! listed separately because the feed credits kills to either.

use crate::models::Role::{Armor, Artillery, Infantry};
use crate::models::Side::{Allies, Axis};
use crate::models::{Role, Side};

/// `(weapon, side, faction, role)`
pub(super) const WEAPONS: &[(&str, Side, &str, Role)] = &[
    // US Infantry
    ("M1A1 THOMPSON", Allies, "US", Infantry),
    ("M3 GREASE GUN", Allies, "US", Infantry),
    ("M1 GARAND", Allies, "US", Infantry),
    ("M1 CARBINE", Allies, "US", Infantry),
    ("M1918A2 BAR", Allies, "US", Infantry),
    ("M97 TRENCH GUN", Allies, "US", Infantry),
    ("BROWNING M1919", Allies, "US", Infantry),
    ("M1903 SPRINGFIELD", Allies, "US", Infantry),
    ("COLT M1911", Allies, "US", Infantry),
    ("M2 FLAMETHROWER", Allies, "US", Infantry),
    ("M3 KNIFE", Allies, "US", Infantry),
    ("MK2 GRENADE", Allies, "US", Infantry),
    ("M2 AP MINE", Allies, "US", Infantry),
    ("M1A1 AT MINE", Allies, "US", Infantry),
    ("BAZOOKA", Allies, "US", Infantry),
    ("57MM CANNON [M1 57mm]", Allies, "US", Infantry),
    ("M3 Half-track", Allies, "US", Infantry),
    ("M2 Browning [M3 Half-track]", Allies, "US", Infantry),
    ("GMC CCKW 353 (Transport)", Allies, "US", Infantry),
    ("GMC CCKW 353 (Supply)", Allies, "US", Infantry),
    ("Jeep Willys", Allies, "US", Infantry),

    // US Artillery
    ("155MM HOWITZER [M114]", Allies, "US", Artillery),

    // US Armor
    ("M8 Greyhound", Allies, "US", Armor),
    ("M6 37mm [M8 Greyhound]", Allies, "US", Armor),
    ("COAXIAL M1919 [M8 Greyhound]", Allies, "US", Armor),
    ("Stuart M5A1", Allies, "US", Armor),
    ("37MM CANNON [Stuart M5A1]", Allies, "US", Armor),
    ("COAXIAL M1919 [Stuart M5A1]", Allies, "US", Armor),
    ("HULL M1919 [Stuart M5A1]", Allies, "US", Armor),
    ("Sherman M4A3(75)W", Allies, "US", Armor),
    ("75MM CANNON [Sherman M4A3(75)W]", Allies, "US", Armor),
    ("COAXIAL M1919 [Sherman M4A3(75)W]", Allies, "US", Armor),
    ("HULL M1919 [Sherman M4A3(75)W]", Allies, "US", Armor),
    ("Sherman M4A3E2", Allies, "US", Armor),
    ("75MM M3 GUN [Sherman M4A3E2]", Allies, "US", Armor),
    ("COAXIAL M1919 [Sherman M4A3E2]", Allies, "US", Armor),
    ("HULL M1919 [Sherman M4A3E2]", Allies, "US", Armor),
    ("Sherman M4A3E2(76)", Allies, "US", Armor),
    ("76MM M1 GUN [Sherman M4A3E2(76)]", Allies, "US", Armor),
    ("COAXIAL M1919 [Sherman M4A3E2(76)]", Allies, "US", Armor),
    ("HULL M1919 [Sherman M4A3E2(76)]", Allies, "US", Armor),

    // GER Infantry
    ("MP40", Axis, "GER", Infantry),
    ("GEWEHR 43", Axis, "GER", Infantry),
    ("KARABINER 98K", Axis, "GER", Infantry),
    ("STG44", Axis, "GER", Infantry),
    ("FG42", Axis, "GER", Infantry),
    ("MG34", Axis, "GER", Infantry),
    ("MG42", Axis, "GER", Infantry),
    ("KARABINER 98K x8", Axis, "GER", Infantry),
    ("FG42 x4", Axis, "GER", Infantry),
    ("WALTHER P38", Axis, "GER", Infantry),
    ("LUGER P08", Axis, "GER", Infantry),
    ("FLAMMENWERFER 41", Axis, "GER", Infantry),
    ("FELDSPATEN", Axis, "GER", Infantry),
    ("M24 STIELHANDGRANATE", Axis, "GER", Infantry),
    ("M43 STIELHANDGRANATE", Axis, "GER", Infantry),
    ("S-MINE", Axis, "GER", Infantry),
    ("TELLERMINE 43", Axis, "GER", Infantry),
    ("PANZERSCHRECK", Axis, "GER", Infantry),
    ("75MM CANNON [PAK 40]", Axis, "GER", Infantry),
    ("Sd.Kfz 251 Half-track", Axis, "GER", Infantry),
    ("MG 42 [Sd.Kfz 251 Half-track]", Axis, "GER", Infantry),
    ("Opel Blitz (Transport)", Axis, "GER", Infantry),
    ("Opel Blitz (Supply)", Axis, "GER", Infantry),
    ("Kubelwagen", Axis, "GER", Infantry),

    // GER Artillery
    ("150MM HOWITZER [sFH 18]", Axis, "GER", Artillery),

    // GER Armor
    ("Sd.Kfz.234 Puma", Axis, "GER", Armor),
    ("50mm KwK 39/1 [Sd.Kfz.234 Puma]", Axis, "GER", Armor),
    ("COAXIAL MG34 [Sd.Kfz.234 Puma]", Axis, "GER", Armor),
    ("Sd.Kfz.121 Luchs", Axis, "GER", Armor),
    ("20MM KWK 30 [Sd.Kfz.121 Luchs]", Axis, "GER", Armor),
    ("COAXIAL MG34 [Sd.Kfz.121 Luchs]", Axis, "GER", Armor),
    ("Sd.Kfz.161 Panzer IV", Axis, "GER", Armor),
    ("75MM CANNON [Sd.Kfz.161 Panzer IV]", Axis, "GER", Armor),
    ("COAXIAL MG34 [Sd.Kfz.161 Panzer IV]", Axis, "GER", Armor),
    ("HULL MG34 [Sd.Kfz.161 Panzer IV]", Axis, "GER", Armor),
    ("Sd.Kfz.181 Tiger 1", Axis, "GER", Armor),
    ("88 KWK 36 L/56 [Sd.Kfz.181 Tiger 1]", Axis, "GER", Armor),
    ("COAXIAL MG34 [Sd.Kfz.181 Tiger 1]", Axis, "GER", Armor),
    ("HULL MG34 [Sd.Kfz.181 Tiger 1]", Axis, "GER", Armor),
    ("Sd.Kfz.171 Panther", Axis, "GER", Armor),
    ("75MM CANNON [Sd.Kfz.171 Panther]", Axis, "GER", Armor),
    ("COAXIAL MG34 [Sd.Kfz.171 Panther]", Axis, "GER", Armor),
    ("HULL MG34 [Sd.Kfz.171 Panther]", Axis, "GER", Armor),

    // RUS Infantry
    ("PPSH 41", Allies, "RUS", Infantry),
    ("PPSH 41 W/DRUM", Allies, "RUS", Infantry),
    ("SVT40", Allies, "RUS", Infantry),
    ("MOSIN NAGANT 1891", Allies, "RUS", Infantry),
    ("MOSIN NAGANT 91/30", Allies, "RUS", Infantry),
    ("MOSIN NAGANT M38", Allies, "RUS", Infantry),
    ("DP-27", Allies, "RUS", Infantry),
    ("SCOPED MOSIN NAGANT 91/30", Allies, "RUS", Infantry),
    ("SCOPED SVT40", Allies, "RUS", Infantry),
    ("NAGANT M1895", Allies, "RUS", Infantry),
    ("TOKAREV TT33", Allies, "RUS", Infantry),
    ("MPL-50 SPADE", Allies, "RUS", Infantry),
    ("RG-42 GRENADE", Allies, "RUS", Infantry),
    ("MOLOTOV", Allies, "RUS", Infantry),
    ("POMZ AP MINE", Allies, "RUS", Infantry),
    ("TM-35 AT MINE", Allies, "RUS", Infantry),
    ("PTRS-41", Allies, "RUS", Infantry),
    // BAZOOKA listed under US
    ("57MM CANNON [ZiS-2]", Allies, "RUS", Infantry),
    // M3 Half-track listed under US
    ("ZIS-5 (Transport)", Allies, "RUS", Infantry),
    ("ZIS-5 (Supply)", Allies, "RUS", Infantry),
    ("GAZ-67", Allies, "RUS", Infantry),

    // RUS Artillery
    ("122MM HOWITZER [M1938 (M-30)]", Allies, "RUS", Artillery),

    // RUS Armor
    ("BA-10", Allies, "RUS", Armor),
    ("19-K 45MM [BA-10]", Allies, "RUS", Armor),
    ("COAXIAL DT [BA-10]", Allies, "RUS", Armor),
    ("T70", Allies, "RUS", Armor),
    ("45MM M1937 [T70]", Allies, "RUS", Armor),
    ("COAXIAL DT [T70]", Allies, "RUS", Armor),
    ("T34/76", Allies, "RUS", Armor),
    ("76MM ZiS-5 [T34/76]", Allies, "RUS", Armor),
    ("COAXIAL DT [T34/76]", Allies, "RUS", Armor),
    ("HULL DT [T34/76]", Allies, "RUS", Armor),
    ("IS-1", Allies, "RUS", Armor),
    ("D-5T 85MM [IS-1]", Allies, "RUS", Armor),
    ("COAXIAL DT [IS-1]", Allies, "RUS", Armor),
    ("HULL DT [IS-1]", Allies, "RUS", Armor),

    // GB Infantry
    ("Sten Gun Mk.II", Allies, "GB", Infantry),
    ("Sten Gun Mk.V", Allies, "GB", Infantry),
    ("Lanchester", Allies, "GB", Infantry),
    ("M1928A1 THOMPSON", Allies, "GB", Infantry),
    ("SMLE No.1 Mk III", Allies, "GB", Infantry),
    ("Rifle No.4 Mk I", Allies, "GB", Infantry),
    ("Rifle No.5 Mk I", Allies, "GB", Infantry),
    ("Bren Gun", Allies, "GB", Infantry),
    ("Lewis Gun", Allies, "GB", Infantry),
    ("Lee-Enfield Pattern 1914 Sniper", Allies, "GB", Infantry),
    ("Rifle No.4 Mk I Sniper", Allies, "GB", Infantry),
    ("Webley MK VI", Allies, "GB", Infantry),
    ("FLAMETHROWER", Allies, "GB", Infantry),
    ("Fairbairn–Sykes", Allies, "GB", Infantry),
    ("Mills Bomb", Allies, "GB", Infantry),
    ("No.82 Grenade", Allies, "GB", Infantry),
    ("A.P. Shrapnel Mine Mk II", Allies, "GB", Infantry),
    ("A.T. Mine G.S. Mk V", Allies, "GB", Infantry),
    ("PIAT", Allies, "GB", Infantry),
    ("Boys Anti-tank Rifle", Allies, "GB", Infantry),
    ("QF 6-POUNDER [QF 6-Pounder]", Allies, "GB", Infantry),
    // M3 Half-track listed under US
    ("Bedford OYD (Transport)", Allies, "GB", Infantry),
    ("Bedford OYD (Supply)", Allies, "GB", Infantry),
    // Jeep Willys listed under US

    // GB Artillery
    ("QF 25-POUNDER [QF 25-Pounder]", Allies, "GB", Artillery),

    // GB Armor
    ("Daimler", Allies, "GB", Armor),
    ("QF 2-POUNDER [Daimler]", Allies, "GB", Armor),
    ("COAXIAL BESA [Daimler]", Allies, "GB", Armor),
    ("Tetrarch", Allies, "GB", Armor),
    ("QF 2-POUNDER [Tetrarch]", Allies, "GB", Armor),
    ("COAXIAL BESA [Tetrarch]", Allies, "GB", Armor),
    ("M3 Stuart Honey", Allies, "GB", Armor),
    ("37MM CANNON [M3 Stuart Honey]", Allies, "GB", Armor),
    ("COAXIAL M1919 [M3 Stuart Honey]", Allies, "GB", Armor),
    ("HULL M1919 [M3 Stuart Honey]", Allies, "GB", Armor),
    ("Cromwell", Allies, "GB", Armor),
    ("QF 75MM [Cromwell]", Allies, "GB", Armor),
    ("COAXIAL BESA [Cromwell]", Allies, "GB", Armor),
    ("HULL BESA [Cromwell]", Allies, "GB", Armor),
    ("Crusader Mk.III", Allies, "GB", Armor),
    ("OQF 57MM [Crusader Mk.III]", Allies, "GB", Armor),
    ("COAXIAL BESA [Crusader Mk.III]", Allies, "GB", Armor),
    ("Firefly", Allies, "GB", Armor),
    ("QF 17-POUNDER [Firefly]", Allies, "GB", Armor),
    ("COAXIAL M1919 [Firefly]", Allies, "GB", Armor),
    ("Churchill Mk.III", Allies, "GB", Armor),
    ("OQF 57MM [Churchill Mk.III]", Allies, "GB", Armor),
    ("COAXIAL BESA 7.92mm [Churchill Mk.III]", Allies, "GB", Armor),
    ("HULL BESA 7.92mm [Churchill Mk.III]", Allies, "GB", Armor),
    ("Churchill Mk.VII", Allies, "GB", Armor),
    ("OQF 57MM [Churchill Mk.VII]", Allies, "GB", Armor),
    ("COAXIAL BESA 7.92mm [Churchill Mk.VII]", Allies, "GB", Armor),
    ("HULL BESA 7.92mm [Churchill Mk.VII]", Allies, "GB", Armor),
];

/// Infantry machine guns, counted separately regardless of side.
pub(super) const MACHINE_GUNS: &[&str] = &["BROWNING M1919", "MG34", "MG42", "DP-27", "Lewis Gun"];
