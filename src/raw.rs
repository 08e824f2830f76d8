//! Direct serialisation of native graphs
//!
//! [stringify] walks the same `Box<dyn Any>` shapes that [Json::from_any] classifies, writing
//! JSON text without building an intermediate [Json]. Sequences and mappings may hold
//! `Option<Box<dyn Any>>` entries, in which case absent entries are either written as `null` or
//! rejected depending on [WriteOptions::absent_as_null]. Nesting is limited by
//! [WriteOptions::max_depth].
use std::any::Any;

use log::debug;

use crate::errors::Error;
use crate::native::{mapping, scalar, sequence};
use crate::value::Json;
use crate::writer::{WriteOptions, Writer};

/// Serialise a native graph into JSON text
pub fn stringify(native: &dyn Any, options: &WriteOptions) -> Result<String, Error> {
    let mut writer = Writer::new(options).depth_limited();
    write_native(&mut writer, native, 0)?;
    Ok(writer.finish())
}

fn write_native(writer: &mut Writer, native: &dyn Any, depth: usize) -> Result<(), Error> {
    writer.check_depth(depth)?;
    if let Some(json) = native.downcast_ref::<Json>() {
        return writer.write_json(json, depth);
    }
    if let Some(boxed) = native.downcast_ref::<Box<dyn Any>>() {
        return write_native(writer, &**boxed, depth);
    }
    if let Some(optional) = native.downcast_ref::<Option<Box<dyn Any>>>() {
        return match optional {
            Some(inner) => write_native(writer, &**inner, depth),
            None if writer.options.absent_as_null => {
                writer.write_null();
                Ok(())
            }
            None => {
                debug!("absent value found at depth {} with absent_as_null unset", depth);
                Err(Error::UnsupportedType)
            }
        };
    }
    if let Some(json) = scalar(native) {
        return writer.write_json(&json, depth);
    }
    if let Some(elements) = native.downcast_ref::<Vec<Json>>() {
        writer.begin_array();
        for (index, element) in elements.iter().enumerate() {
            writer.element(index, depth + 1);
            writer.write_json(element, depth + 1)?;
        }
        writer.end_array(depth, elements.len());
        return Ok(());
    }
    if let Some(elements) = sequence(native) {
        writer.begin_array();
        for (index, element) in elements.iter().enumerate() {
            writer.element(index, depth + 1);
            write_native(writer, *element, depth + 1)?;
        }
        writer.end_array(depth, elements.len());
        return Ok(());
    }
    if let Some(mut members) = mapping(native) {
        members.sort_by(|a, b| a.0.cmp(b.0));
        writer.begin_object();
        for (index, (key, value)) in members.iter().enumerate() {
            writer.key(index, depth + 1, key);
            write_native(writer, *value, depth + 1)?;
        }
        writer.end_object(depth, members.len());
        return Ok(());
    }
    Err(Error::UnsupportedType)
}
