//! Inline object export
//!
//! Objects referenced from an exporting property are written as a nested
//! `Begin Object` (or `Begin Actor`) block. Brush models have no readable
//! properties; their polygon list is located through a back-reference in
//! the raw trailing data and written as a `Begin Brush` block.

use super::compact::read_compact_index;
use super::PropertyFormatter;
use crate::error::Error as DecompilerError;
use crate::format::format_vector;
use crate::model::{Entry, ExportEntry, ObjectData, ObjectInstance, ObjectRef, Polys};
use crate::DecompilerResult;

const ACTOR_CLASS: &str = "Engine.Actor";
const POLYS_CLASS: &str = "Engine.Polys";
const BRUSH_CLASS: &str = "Model";

impl PropertyFormatter<'_> {
    /// Export block for an in-package object at `indent`
    pub fn export_object(&self, reference: ObjectRef, indent: usize) -> DecompilerResult<String> {
        let package = self.ctx.package();
        let export = package.export(reference)?;
        let class = package.class_name(Entry::Export(export))?;
        let instance = match &export.object {
            Some(ObjectData::Object(instance)) => instance,
            _ => {
                return Err(DecompilerError::lookup(
                    "Object",
                    package.full_name(reference)?,
                ))
            }
        };

        if class.eq_ignore_ascii_case(BRUSH_CLASS) {
            return self.export_brush(reference, export, instance, indent);
        }

        let kind = if package.is_subclass(ACTOR_CLASS, &package.class_full_name(export)?) {
            "Actor"
        } else {
            "Object"
        };
        log::debug!("Exporting {} {} inline", kind, export.name);

        let mut out = format!("Begin {} Class={} Name={}", kind, class, export.name);
        out.push_str(&self.ctx.new_line(indent + 1));
        out.push_str(&self.properties(&instance.properties, indent + 1)?);
        out.push_str(&self.ctx.new_line(indent));
        out.push_str("End ");
        out.push_str(kind);
        Ok(out)
    }

    fn export_brush(
        &self,
        reference: ObjectRef,
        export: &ExportEntry,
        instance: &ObjectInstance,
        indent: usize,
    ) -> DecompilerResult<String> {
        let package = self.ctx.package();
        let polys = self.find_polys(instance).ok_or_else(|| DecompilerError::MalformedBrush {
            object: package
                .full_name(reference)
                .unwrap_or_else(|_| export.name.clone()),
        })?;
        log::debug!(
            "Exporting brush {} with {} polygons",
            export.name,
            polys.polygons.len()
        );

        let mut out = format!("Begin Brush Name={}", export.name);
        out.push_str(&self.ctx.new_line(indent + 1));
        out.push_str("Begin PolyList");
        for polygon in &polys.polygons {
            out.push_str(&self.ctx.new_line(indent + 2));
            out.push_str("Begin Polygon");
            if !polygon.item_name.eq_ignore_ascii_case("None") {
                out.push_str(&format!(" Item={}", polygon.item_name));
            }
            if !polygon.texture.is_none() {
                out.push_str(&format!(" Texture={}", package.full_name(polygon.texture)?));
            }
            if polygon.flags != 0 {
                out.push_str(&format!(" Flags={}", polygon.flags));
            }
            out.push_str(&format!(" Link={}", polygon.link));

            let vectors = [
                ("Origin   ", &polygon.origin),
                ("Normal   ", &polygon.normal),
                ("TextureU ", &polygon.texture_u),
                ("TextureV ", &polygon.texture_v),
            ];
            let vertices = polygon.vertices.iter().map(|vertex| ("Vertex   ", vertex));
            for (label, vector) in vectors.into_iter().chain(vertices) {
                out.push_str(&self.ctx.new_line(indent + 3));
                out.push_str(label);
                out.push_str(&format_vector(vector));
            }
            out.push_str(&self.ctx.new_line(indent + 2));
            out.push_str("End Polygon");
        }
        out.push_str(&self.ctx.new_line(indent + 1));
        out.push_str("End PolyList");
        out.push_str(&self.ctx.new_line(indent));
        out.push_str("End Brush");
        Ok(out)
    }

    /// Scan the trailing data backward for a reference to a polygon list
    fn find_polys(&self, instance: &ObjectInstance) -> Option<&Polys> {
        let package = self.ctx.package();
        let bytes = &instance.unread_bytes;
        (1..bytes.len()).rev().find_map(|position| {
            let reference = ObjectRef(read_compact_index(bytes, position)?);
            let Ok(Some(Entry::Export(candidate))) = package.entry(reference) else {
                return None;
            };
            let class = package.class_full_name(candidate).ok()?;
            if !class.eq_ignore_ascii_case(POLYS_CLASS) {
                return None;
            }
            match &candidate.object {
                Some(ObjectData::Polys(polys)) => {
                    log::trace!("Polygon list reference at byte {}", position);
                    Some(polys)
                }
                _ => None,
            }
        })
    }
}
