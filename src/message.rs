use chrono::NaiveDate;

use crate::core::plant::Plant;

/// Where a confirmed picker color lands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerTarget {
    /// The add form's color draft.
    AddForm,
    /// The selected plant's edit buffer.
    EditBuffer,
}

#[derive(Debug, Clone)]
pub enum Message {
    // Month navigation
    PrevMonth,
    NextMonth,
    GoToday,

    // Calendar
    ToggleDay(NaiveDate),

    // Add form
    AddNameChanged(String),
    AddColorChanged(String),
    AddSubmit,

    // Selection and edit buffer
    SelectPlant(String),
    EditNameChanged(String),
    EditColorChanged(String),
    CommitEdit,
    DeleteSelected,

    // Color picker
    OpenColorPicker(PickerTarget),
    PickerInputChanged(String),
    PickerPreset(usize),
    PickerConfirm,
    PickerCancel,

    // Startup
    PlantsLoaded(Vec<Plant>, Option<String>),
}
