//! Streaming reader for MAME `-listxml` output.
//!
//! Only the parts of a machine the catalog needs are read: the flags on the
//! `<machine>` (or legacy `<game>`) element and its direct `description`,
//! `year`, `manufacturer`, `driver` and first `display` children.
//!
//! Some MAME versions given several names print one XML document per name.
//! Anything after the root element closes is therefore reported as
//! malformed output rather than silently ignored.

use std::io::BufRead;

use mamecat_core::{CatalogError, MachineRecord};
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DocState {
    BeforeRoot,
    InRoot,
    AfterRoot,
}

#[derive(Debug, Clone, Copy)]
enum TextField {
    Description,
    Year,
    Manufacturer,
}

/// Iterates over the machines of a `-listxml` document as they are read.
///
/// Machines without a `name` attribute are skipped. The first error ends
/// the iteration.
pub struct MachineReader<R: BufRead> {
    xml: Reader<R>,
    buf: Vec<u8>,
    state: DocState,
    done: bool,
}

impl<R: BufRead> MachineReader<R> {
    pub fn new(reader: R) -> Self {
        let mut xml = Reader::from_reader(reader);
        xml.config_mut().trim_text(true);
        Self {
            xml,
            buf: Vec::new(),
            state: DocState::BeforeRoot,
            done: false,
        }
    }

    fn next_event(&mut self) -> Result<Event<'static>, CatalogError> {
        self.buf.clear();
        let event = self.xml.read_event_into(&mut self.buf).map_err(xml_error)?;
        Ok(event.into_owned())
    }

    fn next_machine(&mut self) -> Result<Option<MachineRecord>, CatalogError> {
        loop {
            let event = self.next_event()?;
            match (self.state, event) {
                (DocState::BeforeRoot, Event::Start(_)) => self.state = DocState::InRoot,
                (DocState::BeforeRoot, Event::Empty(_)) => self.state = DocState::AfterRoot,
                (DocState::BeforeRoot, Event::Eof) => {
                    return Err(CatalogError::malformed("no root element"));
                }

                (DocState::InRoot, Event::Start(e)) => {
                    if is_machine(&e) {
                        if let Some(record) = self.read_machine(&e, false)? {
                            return Ok(Some(record));
                        }
                    } else {
                        self.skip_element(&e)?;
                    }
                }
                (DocState::InRoot, Event::Empty(e)) => {
                    if is_machine(&e) {
                        if let Some(record) = self.read_machine(&e, true)? {
                            return Ok(Some(record));
                        }
                    }
                }
                (DocState::InRoot, Event::End(_)) => self.state = DocState::AfterRoot,
                (DocState::InRoot, Event::Eof) => {
                    return Err(CatalogError::malformed("document ended inside the root element"));
                }

                (DocState::AfterRoot, Event::Eof) => return Ok(None),
                (
                    DocState::AfterRoot,
                    Event::Start(_) | Event::Empty(_) | Event::Decl(_) | Event::DocType(_),
                ) => {
                    return Err(CatalogError::malformed(format!(
                        "content after the root element at byte {}",
                        self.xml.buffer_position()
                    )));
                }

                (DocState::BeforeRoot | DocState::AfterRoot, Event::Text(_) | Event::CData(_)) => {
                    return Err(CatalogError::malformed("text outside the root element"));
                }
                _ => {}
            }
        }
    }

    fn read_machine(
        &mut self,
        start: &BytesStart<'_>,
        is_empty: bool,
    ) -> Result<Option<MachineRecord>, CatalogError> {
        let mut name = None;
        let mut record = MachineRecord::new("");

        for attr in start.attributes() {
            let attr = attr.map_err(|e| CatalogError::malformed(e.to_string()))?;
            let value = attr.unescape_value().map_err(xml_error)?;
            match attr.key.as_ref() {
                b"name" => name = Some(value.into_owned()),
                b"isdevice" => record.is_device = parse_flag(&value).unwrap_or(false),
                b"isbios" => record.is_bios = parse_flag(&value).unwrap_or(false),
                b"ismechanical" => record.is_mechanical = parse_flag(&value).unwrap_or(false),
                b"runnable" => record.runnable = parse_flag(&value).unwrap_or(true),
                _ => {}
            }
        }

        if !is_empty {
            self.read_machine_children(&mut record)?;
        }

        Ok(name.filter(|n| !n.is_empty()).map(|name| {
            record.name = name;
            record
        }))
    }

    fn read_machine_children(&mut self, record: &mut MachineRecord) -> Result<(), CatalogError> {
        // Open elements below the machine; 0 means directly inside it.
        let mut depth = 0usize;
        let mut field = None;
        let mut seen_display = false;

        loop {
            match self.next_event()? {
                Event::Start(e) => {
                    if depth == 0 {
                        field = match e.name().as_ref() {
                            b"description" => Some(TextField::Description),
                            b"year" => Some(TextField::Year),
                            b"manufacturer" => Some(TextField::Manufacturer),
                            _ => {
                                read_child_attributes(&e, record, &mut seen_display)?;
                                None
                            }
                        };
                    }
                    depth += 1;
                }
                Event::Empty(e) => {
                    if depth == 0 {
                        read_child_attributes(&e, record, &mut seen_display)?;
                    }
                }
                Event::Text(e) => {
                    if depth == 1 {
                        if let Some(field) = field {
                            let text = e.unescape().map_err(xml_error)?;
                            let target = match field {
                                TextField::Description => &mut record.description,
                                TextField::Year => &mut record.year,
                                TextField::Manufacturer => &mut record.manufacturer,
                            };
                            target.push_str(&text);
                        }
                    }
                }
                Event::End(_) => {
                    if depth == 0 {
                        return Ok(());
                    }
                    depth -= 1;
                    if depth == 0 {
                        field = None;
                    }
                }
                Event::Eof => {
                    return Err(CatalogError::malformed("document ended inside a machine"));
                }
                _ => {}
            }
        }
    }

    fn skip_element(&mut self, start: &BytesStart<'_>) -> Result<(), CatalogError> {
        self.buf.clear();
        self.xml
            .read_to_end_into(start.name(), &mut self.buf)
            .map_err(xml_error)?;
        Ok(())
    }
}

impl<R: BufRead> Iterator for MachineReader<R> {
    type Item = Result<MachineRecord, CatalogError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.next_machine() {
            Ok(Some(record)) => Some(Ok(record)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}

/// Read every machine in `reader`.
pub fn parse_machines<R: BufRead>(reader: R) -> Result<Vec<MachineRecord>, CatalogError> {
    MachineReader::new(reader).collect()
}

fn is_machine(e: &BytesStart<'_>) -> bool {
    matches!(e.name().as_ref(), b"machine" | b"game")
}

/// Pick up `driver/@status` and the first `display/@rotate`.
fn read_child_attributes(
    e: &BytesStart<'_>,
    record: &mut MachineRecord,
    seen_display: &mut bool,
) -> Result<(), CatalogError> {
    match e.name().as_ref() {
        b"driver" => {
            record.status = Some(attribute(e, b"status")?.unwrap_or_default());
        }
        b"display" if !*seen_display => {
            *seen_display = true;
            record.rotation = attribute(e, b"rotate")?.unwrap_or_default();
        }
        _ => {}
    }
    Ok(())
}

fn attribute(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>, CatalogError> {
    for attr in e.attributes() {
        let attr = attr.map_err(|e| CatalogError::malformed(e.to_string()))?;
        if attr.key.as_ref() == key {
            let value = attr.unescape_value().map_err(xml_error)?;
            return Ok(Some(value.into_owned()));
        }
    }
    Ok(None)
}

/// `yes`/`no` as MAME writes them; `true`/`false` and `1`/`0` also accepted.
fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "true" | "1" => Some(true),
        "no" | "false" | "0" => Some(false),
        _ => None,
    }
}

fn xml_error(e: quick_xml::Error) -> CatalogError {
    match e {
        quick_xml::Error::Io(io) => CatalogError::Io(std::io::Error::new(io.kind(), io.to_string())),
        other => CatalogError::malformed(other.to_string()),
    }
}

#[cfg(test)]
#[path = "tests/listxml_tests.rs"]
mod tests;
