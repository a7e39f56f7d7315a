use core::fmt;

use crate::port::PortIo;

const CMOS_INDEX: u16 = 0x70;
const CMOS_DATA: u16 = 0x71;
/// 软驱类型字节：高4位为0号驱动器，低4位为1号驱动器
const CMOS_FLOPPY_TYPES: u8 = 0x10;

/// BIOS 在 CMOS 中登记的软驱类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriveType {
    None,
    Floppy360K,
    Floppy1200K,
    Floppy720K,
    Floppy1440K,
    Floppy2880K,
    Unknown(u8),
}

impl From<u8> for DriveType {
    fn from(nibble: u8) -> Self {
        match nibble {
            0 => Self::None,
            1 => Self::Floppy360K,
            2 => Self::Floppy1200K,
            3 => Self::Floppy720K,
            4 => Self::Floppy1440K,
            5 => Self::Floppy2880K,
            other => Self::Unknown(other),
        }
    }
}

impl fmt::Display for DriveType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::None => "none",
            Self::Floppy360K => "360kB 5.25\"",
            Self::Floppy1200K => "1.2MB 5.25\"",
            Self::Floppy720K => "720kB 3.5\"",
            Self::Floppy1440K => "1.44MB 3.5\"",
            Self::Floppy2880K => "2.88MB 3.5\"",
            Self::Unknown(_) => "unknown type",
        })
    }
}

/// 读出两个驱动器的类型
pub fn detect(ports: &mut impl PortIo) -> (DriveType, DriveType) {
    ports.write_u8(CMOS_INDEX, CMOS_FLOPPY_TYPES);
    let drives = ports.read_u8(CMOS_DATA);
    (DriveType::from(drives >> 4), DriveType::from(drives & 0x0F))
}
