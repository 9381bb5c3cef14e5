//! Key-unique ordered collection of fields

use crate::events::FieldEvent;
use crate::field::{
    CheckBox, Field, FieldKind, FileUpload, Hidden, InputField, ListField, Literal, OrientableField,
    Owner, Select, TextField,
};
use crate::value_objects::DataItem;
use crate::{FormError, Result};
use serde::{Serialize, Serializer};
use std::iter;
use std::ops::Deref;
use std::slice;

/// The fields of one form, in insertion order
///
/// Keys are pairwise distinct and non-empty. Every mutation validates
/// first and mutates second, so a failed call leaves the list untouched.
/// Fields are attached to the owning form on the way in and detached on
/// the way out.
#[derive(Debug, Clone)]
pub struct FieldList {
    owner: Owner,
    fields: Vec<Field>,
}

impl FieldList {
    pub(crate) fn new(owner: Owner) -> Self {
        Self {
            owner,
            fields: Vec::new(),
        }
    }

    /// Re-point every field at a new owner
    pub(crate) fn set_owner(&mut self, owner: Owner) {
        for field in &mut self.fields {
            field.attach(owner.clone());
        }
        self.owner = owner;
    }

    /// Check that `key` could be added to the list
    pub fn validate_key(&self, key: &str) -> Result<()> {
        self.check_key(key, None)
    }

    fn check_key(&self, key: &str, skip: Option<usize>) -> Result<()> {
        if key.is_empty() {
            return Err(FormError::InvalidKey);
        }
        let taken = self
            .fields
            .iter()
            .enumerate()
            .any(|(i, f)| Some(i) != skip && f.key() == key);
        if taken {
            return Err(FormError::DuplicateKey(key.to_string()));
        }
        Ok(())
    }

    fn out_of_bounds(&self, index: usize) -> FormError {
        FormError::IndexOutOfBounds {
            index,
            len: self.fields.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Field> {
        self.fields.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<FieldMut<'_>> {
        self.fields.get_mut(index).map(FieldMut)
    }

    /// Replace the field at `index`, returning the detached previous one
    pub fn set(&mut self, index: usize, mut field: Field) -> Result<Field> {
        if index >= self.fields.len() {
            return Err(self.out_of_bounds(index));
        }
        self.check_key(field.key(), Some(index))?;
        field.attach(self.owner.clone());
        let mut old = std::mem::replace(&mut self.fields[index], field);
        old.detach();
        Ok(old)
    }

    /// Insert at `index`, shifting later fields
    pub fn insert(&mut self, index: usize, mut field: Field) -> Result<()> {
        if index > self.fields.len() {
            return Err(self.out_of_bounds(index));
        }
        self.check_key(field.key(), None)?;
        field.attach(self.owner.clone());
        self.fields.insert(index, field);
        Ok(())
    }

    /// Append
    pub fn push(&mut self, field: Field) -> Result<()> {
        self.insert(self.fields.len(), field)
    }

    /// Remove the field at `index`
    pub fn remove(&mut self, index: usize) -> Result<Field> {
        if index >= self.fields.len() {
            return Err(self.out_of_bounds(index));
        }
        let mut field = self.fields.remove(index);
        field.detach();
        Ok(field)
    }

    /// Remove the field with `key`, if any
    pub fn remove_field(&mut self, key: &str) -> Option<Field> {
        let index = self.index_of(key)?;
        self.remove(index).ok()
    }

    /// Remove every field
    pub fn clear(&mut self) -> Vec<Field> {
        let mut fields = std::mem::take(&mut self.fields);
        for field in &mut fields {
            field.detach();
        }
        fields
    }

    pub fn contains(&self, key: &str) -> bool {
        self.index_of(key).is_some()
    }

    pub fn index_of(&self, key: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.key() == key)
    }

    pub fn find(&self, key: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.key() == key)
    }

    pub fn find_mut(&mut self, key: &str) -> Option<FieldMut<'_>> {
        self.fields.iter_mut().find(|f| f.key() == key).map(FieldMut)
    }

    /// Change the key of an attached field
    ///
    /// The new key is checked against every other field. Re-assigning a
    /// field its current key is allowed.
    pub fn rekey(&mut self, key: &str, new_key: impl Into<String>) -> Result<()> {
        let index = self
            .index_of(key)
            .ok_or_else(|| FormError::UnknownField(key.to_string()))?;
        let new_key = new_key.into();
        self.check_key(&new_key, Some(index))?;
        self.fields[index].replace_key(new_key);
        Ok(())
    }

    pub fn iter(&self) -> slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn iter_mut<'a>(&'a mut self) -> IterMut<'a> {
        self.fields
            .iter_mut()
            .map(FieldMut as fn(&'a mut Field) -> FieldMut<'a>)
    }

    /// Field keys in order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(Field::key)
    }
}

impl<'a> IntoIterator for &'a FieldList {
    type Item = &'a Field;
    type IntoIter = slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl<'a> IntoIterator for &'a mut FieldList {
    type Item = FieldMut<'a>;
    type IntoIter = IterMut<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

/// Mutable iterator over a field list
pub type IterMut<'a> = iter::Map<slice::IterMut<'a, Field>, fn(&'a mut Field) -> FieldMut<'a>>;

/// Mutable access to a field held by a [`FieldList`]
///
/// Reads go through `Deref<Target = Field>`. Writes are limited to the
/// field's settings, data and variant; the field itself can't be replaced,
/// so its key and owner stay under the list's control. Use
/// [`FieldList::set`] to replace a field and [`FieldList::rekey`] to rename
/// one.
///
/// ```compile_fail
/// use dynforms_core::{Field, Form};
///
/// let mut form = Form::new();
/// form.add_fields([Field::text_box().with_key("a"), Field::text_box().with_key("b")])
///     .unwrap();
/// *form.field_mut("a").unwrap() = Field::check_box().with_key("b");
/// ```
#[derive(Debug)]
pub struct FieldMut<'a>(&'a mut Field);

impl Deref for FieldMut<'_> {
    type Target = Field;

    fn deref(&self) -> &Field {
        self.0
    }
}

impl FieldMut<'_> {
    pub fn set_template(&mut self, template: impl Into<String>) {
        self.0.set_template(template);
    }

    pub fn set_display(&mut self, display: bool) {
        self.0.set_display(display);
    }

    pub fn set_display_order(&mut self, order: i32) {
        self.0.set_display_order(order);
    }

    pub fn set_group(&mut self, group: Option<String>) {
        self.0.set_group(group);
    }

    pub fn add_data_value<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
        client_side: bool,
    ) -> Result<()> {
        self.0.add_data_value(key, value, client_side)
    }

    pub fn remove_data_value(&mut self, key: &str) -> Option<DataItem> {
        self.0.remove_data_value(key)
    }

    pub fn kind_mut(&mut self) -> &mut FieldKind {
        self.0.kind_mut()
    }

    pub fn as_input_mut(&mut self) -> Option<&mut dyn InputField> {
        self.0.as_input_mut()
    }

    pub fn as_text_mut(&mut self) -> Option<&mut TextField> {
        self.0.as_text_mut()
    }

    pub fn as_list_mut(&mut self) -> Option<&mut ListField> {
        self.0.as_list_mut()
    }

    pub fn as_orientable_mut(&mut self) -> Option<&mut OrientableField> {
        self.0.as_orientable_mut()
    }

    pub fn as_select_mut(&mut self) -> Option<&mut Select> {
        self.0.as_select_mut()
    }

    pub fn as_check_box_mut(&mut self) -> Option<&mut CheckBox> {
        self.0.as_check_box_mut()
    }

    pub fn as_hidden_mut(&mut self) -> Option<&mut Hidden> {
        self.0.as_hidden_mut()
    }

    pub fn as_file_upload_mut(&mut self) -> Option<&mut FileUpload> {
        self.0.as_file_upload_mut()
    }

    pub fn as_literal_mut(&mut self) -> Option<&mut Literal> {
        self.0.as_literal_mut()
    }

    pub fn clear_error(&mut self) {
        self.0.clear_error();
    }

    pub fn on_validated<F>(&mut self, hook: F)
    where
        F: Fn(&FieldEvent) + Send + Sync + 'static,
    {
        self.0.on_validated(hook);
    }

    pub fn validate(&mut self) -> bool {
        self.0.validate()
    }
}

impl Serialize for FieldList {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.fields.serialize(serializer)
    }
}
