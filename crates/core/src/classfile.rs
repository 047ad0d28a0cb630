//! Minimal reader for the JVM class-file binary format
//!
//! Reads just enough of a compiled class to learn its own name, its direct
//! superclass, and its interfaces: the magic number, the constant pool, and
//! the class/interface index table. Everything past the interface table
//! (fields, methods, attributes) is never touched.

use crate::types::{SpigletError, SpigletResult};

const MAGIC: u32 = 0xCAFE_BABE;

/// What one compiled class declares about its place in the hierarchy.
///
/// Names are in internal (slash-separated) form, e.g.
/// `org/bukkit/plugin/java/JavaPlugin`. `super_name` is `None` only for
/// `java/lang/Object` and malformed inputs that claim no superclass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassRecord {
    pub name: String,
    pub super_name: Option<String>,
    pub interfaces: Vec<String>,
}

/// Constant-pool entries we care about; everything else is skipped over
enum CpEntry {
    Utf8(String),
    Class(u16),
    Other,
}

struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    path: &'a str,
}

impl<'a> Reader<'a> {
    fn new(path: &'a str, buf: &'a [u8]) -> Self {
        Self { buf, pos: 0, path }
    }

    fn fail(&self, message: impl Into<String>) -> SpigletError {
        SpigletError::ClassFile {
            path: self.path.to_string(),
            message: message.into(),
        }
    }

    fn bytes(&mut self, len: usize) -> SpigletResult<&'a [u8]> {
        let end = self
            .pos
            .checked_add(len)
            .filter(|&end| end <= self.buf.len())
            .ok_or_else(|| self.fail(format!("truncated at offset {}", self.pos)))?;
        let slice = &self.buf[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn u8(&mut self) -> SpigletResult<u8> {
        Ok(self.bytes(1)?[0])
    }

    fn u16(&mut self) -> SpigletResult<u16> {
        let b = self.bytes(2)?;
        Ok(u16::from_be_bytes([b[0], b[1]]))
    }

    fn u32(&mut self) -> SpigletResult<u32> {
        let b = self.bytes(4)?;
        Ok(u32::from_be_bytes([b[0], b[1], b[2], b[3]]))
    }
}

/// Parse the hierarchy-relevant head of a class file.
///
/// `path` is used only for error messages.
pub fn parse_class(path: &str, bytes: &[u8]) -> SpigletResult<ClassRecord> {
    let mut r = Reader::new(path, bytes);

    if r.u32()? != MAGIC {
        return Err(r.fail("bad magic number"));
    }
    r.u16()?; // minor version
    r.u16()?; // major version

    let pool = read_constant_pool(&mut r)?;

    r.u16()?; // access flags
    let this_class = r.u16()?;
    let super_class = r.u16()?;

    let name = resolve_class_name(&r, &pool, this_class)?;
    let super_name = if super_class == 0 {
        None
    } else {
        Some(resolve_class_name(&r, &pool, super_class)?)
    };

    let interface_count = r.u16()?;
    let mut interfaces = Vec::with_capacity(interface_count as usize);
    for _ in 0..interface_count {
        let index = r.u16()?;
        interfaces.push(resolve_class_name(&r, &pool, index)?);
    }

    Ok(ClassRecord {
        name,
        super_name,
        interfaces,
    })
}

fn read_constant_pool(r: &mut Reader<'_>) -> SpigletResult<Vec<CpEntry>> {
    let count = r.u16()? as usize;
    if count == 0 {
        return Err(r.fail("constant pool count must be at least 1"));
    }

    // Pool indices are 1-based; slot 0 stays unused.
    let mut pool = Vec::with_capacity(count);
    pool.push(CpEntry::Other);

    let mut index = 1;
    while index < count {
        let tag = r.u8()?;
        let entry = match tag {
            // CONSTANT_Utf8
            1 => {
                let len = r.u16()? as usize;
                let raw = r.bytes(len)?;
                // Class names are ASCII in practice; modified-UTF8 oddities
                // only show up in string literals, which we never resolve.
                CpEntry::Utf8(String::from_utf8_lossy(raw).into_owned())
            }
            // CONSTANT_Class
            7 => CpEntry::Class(r.u16()?),
            // CONSTANT_String, MethodType, Module, Package
            8 | 16 | 19 | 20 => {
                r.u16()?;
                CpEntry::Other
            }
            // CONSTANT_MethodHandle
            15 => {
                r.u8()?;
                r.u16()?;
                CpEntry::Other
            }
            // CONSTANT_Integer, Float, Fieldref, Methodref,
            // InterfaceMethodref, NameAndType, Dynamic, InvokeDynamic
            3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => {
                r.u32()?;
                CpEntry::Other
            }
            // CONSTANT_Long, Double occupy two pool slots
            5 | 6 => {
                r.u32()?;
                r.u32()?;
                pool.push(CpEntry::Other);
                index += 1;
                CpEntry::Other
            }
            other => {
                return Err(r.fail(format!(
                    "unknown constant pool tag {} at entry {}",
                    other, index
                )))
            }
        };
        pool.push(entry);
        index += 1;
    }

    Ok(pool)
}

fn resolve_class_name(r: &Reader<'_>, pool: &[CpEntry], index: u16) -> SpigletResult<String> {
    let name_index = match pool.get(index as usize) {
        Some(CpEntry::Class(name_index)) => *name_index,
        _ => {
            return Err(r.fail(format!(
                "constant pool entry {} is not a class reference",
                index
            )))
        }
    };
    match pool.get(name_index as usize) {
        Some(CpEntry::Utf8(name)) => Ok(name.clone()),
        _ => Err(r.fail(format!(
            "class reference {} points at non-UTF8 entry {}",
            index, name_index
        ))),
    }
}

/// Assemble the head of a class file declaring the given hierarchy.
/// Test fixture shared with the detection and project tests.
#[cfg(test)]
pub(crate) fn class_bytes(name: &str, super_name: Option<&str>, interfaces: &[&str]) -> Vec<u8> {
    let mut pool: Vec<Vec<u8>> = Vec::new();
    let add_class = |pool: &mut Vec<Vec<u8>>, class_name: &str| -> u16 {
        let mut utf8 = vec![1u8];
        utf8.extend((class_name.len() as u16).to_be_bytes());
        utf8.extend(class_name.as_bytes());
        pool.push(utf8);
        let utf8_index = pool.len() as u16;
        let mut class = vec![7u8];
        class.extend(utf8_index.to_be_bytes());
        pool.push(class);
        pool.len() as u16
    };

    let this_index = add_class(&mut pool, name);
    let super_index = super_name.map(|s| add_class(&mut pool, s)).unwrap_or(0);
    let interface_indices: Vec<u16> = interfaces
        .iter()
        .map(|i| add_class(&mut pool, i))
        .collect();

    let mut out = Vec::new();
    out.extend(MAGIC.to_be_bytes());
    out.extend(0u16.to_be_bytes()); // minor
    out.extend(52u16.to_be_bytes()); // major, Java 8
    out.extend(((pool.len() + 1) as u16).to_be_bytes());
    for entry in &pool {
        out.extend(entry);
    }
    out.extend(0x0021u16.to_be_bytes()); // ACC_PUBLIC | ACC_SUPER
    out.extend(this_index.to_be_bytes());
    out.extend(super_index.to_be_bytes());
    out.extend((interface_indices.len() as u16).to_be_bytes());
    for index in interface_indices {
        out.extend(index.to_be_bytes());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_class() {
        let bytes = class_bytes(
            "com/example/MyPlugin",
            Some("org/bukkit/plugin/java/JavaPlugin"),
            &[],
        );
        let record = parse_class("MyPlugin.class", &bytes).unwrap();
        assert_eq!(record.name, "com/example/MyPlugin");
        assert_eq!(
            record.super_name.as_deref(),
            Some("org/bukkit/plugin/java/JavaPlugin")
        );
        assert!(record.interfaces.is_empty());
    }

    #[test]
    fn test_parse_interfaces() {
        let bytes = class_bytes(
            "com/example/Listener",
            Some("java/lang/Object"),
            &["org/bukkit/event/Listener", "java/io/Serializable"],
        );
        let record = parse_class("Listener.class", &bytes).unwrap();
        assert_eq!(
            record.interfaces,
            vec![
                "org/bukkit/event/Listener".to_string(),
                "java/io/Serializable".to_string()
            ]
        );
    }

    #[test]
    fn test_object_has_no_superclass() {
        let bytes = class_bytes("java/lang/Object", None, &[]);
        let record = parse_class("Object.class", &bytes).unwrap();
        assert_eq!(record.super_name, None);
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = class_bytes("com/example/A", Some("java/lang/Object"), &[]);
        bytes[0] = 0x00;
        let err = parse_class("A.class", &bytes).unwrap_err();
        assert!(err.to_string().contains("bad magic"));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = class_bytes("com/example/A", Some("java/lang/Object"), &[]);
        let err = parse_class("A.class", &bytes[..10]).unwrap_err();
        assert!(err.to_string().contains("truncated"));
    }

    #[test]
    fn test_long_entries_take_two_slots() {
        // Hand-built pool: Long at 1 (slots 1-2), Utf8 at 3, Class at 4
        let name = "com/example/B";
        let mut out = Vec::new();
        out.extend(MAGIC.to_be_bytes());
        out.extend(0u16.to_be_bytes());
        out.extend(52u16.to_be_bytes());
        out.extend(5u16.to_be_bytes()); // pool count = entries + 1
        out.push(5u8); // CONSTANT_Long
        out.extend(0u64.to_be_bytes());
        out.push(1u8); // CONSTANT_Utf8
        out.extend((name.len() as u16).to_be_bytes());
        out.extend(name.as_bytes());
        out.push(7u8); // CONSTANT_Class
        out.extend(3u16.to_be_bytes());
        out.extend(0x0021u16.to_be_bytes());
        out.extend(4u16.to_be_bytes()); // this_class
        out.extend(0u16.to_be_bytes()); // super_class
        out.extend(0u16.to_be_bytes()); // interfaces

        let record = parse_class("B.class", &out).unwrap();
        assert_eq!(record.name, name);
    }
}
