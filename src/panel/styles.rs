//! Stylesheet for the settings overlay, injected once into `<head>`.

pub const PANEL_CSS: &str = r"
#tweak-modal-overlay {
  position: fixed; top: 0; left: 0; width: 100%; height: 100%;
  background-color: rgba(0, 0, 0, 0.8);
  display: none;
  justify-content: center; align-items: center; z-index: 10001;
  font-family: sans-serif;
}
#tweak-modal {
  background-color: #252525;
  color: #f0f0f0;
  padding: 25px 35px;
  border-radius: 8px;
  min-width: 350px;
  max-width: 500px;
  box-shadow: 0 8px 25px rgba(0, 0, 0, 0.6);
  position: relative;
  border: 1px solid #4a4a4a;
}
#tweak-modal h2 {
  margin-top: 0; margin-bottom: 20px;
  color: #ffffff;
  font-size: 1.5em;
  font-weight: 600;
  text-align: center;
}
#tweak-modal-feedback {
  font-size: 0.9em;
  color: #a0cfff;
  margin-top: 15px;
  margin-bottom: 5px;
  min-height: 1.2em;
  text-align: center;
  font-weight: 500;
}
.tweak-settings-section {
  background-color: #333333;
  padding: 20px 25px;
  border-radius: 6px;
  margin-top: 10px;
  border: 1px solid #484848;
}
.tweak-font-intro { margin-bottom: 15px; font-size: 0.9em; color: #ccc; }
.tweak-checkbox-item { margin-bottom: 18px; display: flex; align-items: center; }
.tweak-checkbox-item:last-child { margin-bottom: 5px; }
.tweak-checkbox-item input[type='checkbox'] {
  margin-right: 15px;
  cursor: pointer;
  background-color: #555;
  border-radius: 3px;
  border: 1px solid #777;
  appearance: none;
  -webkit-appearance: none;
  width: 1.2em;
  height: 1.2em;
  position: relative;
}
.tweak-checkbox-item input[type='checkbox']::before {
  content: '\2713';
  display: block;
  position: absolute;
  top: 50%; left: 50%;
  transform: translate(-50%, -50%) scale(0);
  font-size: 1em;
  font-weight: bold;
  color: white;
  transition: transform 0.1s ease-in-out;
  line-height: 1;
}
.tweak-checkbox-item input[type='checkbox']:checked {
  background-color: #0d6efd;
  border-color: #0d6efd;
}
.tweak-checkbox-item input[type='checkbox']:checked::before {
  transform: translate(-50%, -50%) scale(1.2);
}
.tweak-checkbox-item label { cursor: pointer; flex-grow: 1; font-size: 1em; color: #e0e0e0; }
.tweak-modal-footer {
  margin-top: 25px;
  padding-top: 15px;
  border-top: 1px solid #4a4a4a;
  display: flex;
  justify-content: flex-end;
}
#tweak-modal-bottom-close {
  background-color: #dc3545;
  color: white;
  border: 1px solid #dc3545;
  padding: 8px 18px;
  border-radius: 6px;
  font-size: 0.95em;
  font-weight: 500;
  cursor: pointer;
  transition: background-color 0.2s ease, border-color 0.2s ease;
}
#tweak-modal-bottom-close:hover { background-color: #c82333; border-color: #bd2130; }
.tweak-color-item {
  margin-top: 20px;
  padding-top: 15px;
  border-top: 1px solid #4a4a4a;
  display: flex;
  align-items: center;
  justify-content: space-between;
}
.tweak-color-item label { margin-right: 10px; color: #e0e0e0; font-size: 1em; }
.tweak-color-input-wrapper { display: flex; align-items: center; }
.tweak-color-item input[type='color'] {
  width: 40px;
  height: 30px;
  border: 1px solid #777;
  border-radius: 4px;
  cursor: pointer;
  background-color: #555;
  margin-right: 10px;
  padding: 2px;
}
.tweak-reset-button {
  background-color: #6c757d;
  color: white;
  border: 1px solid #6c757d;
  padding: 4px 10px;
  border-radius: 4px;
  font-size: 0.85em;
  font-weight: 500;
  cursor: pointer;
  transition: background-color 0.2s ease, border-color 0.2s ease;
}
.tweak-reset-button:hover { background-color: #5a6268; border-color: #545b62; }
.tweak-text-item { margin-top: 20px; display: flex; align-items: center; }
.tweak-text-item label { color: #e0e0e0; font-size: 1em; white-space: nowrap; margin-right: 10px; }
.tweak-text-input-wrapper { display: flex; align-items: center; flex-grow: 1; }
.tweak-text-item input[type='text'],
.tweak-text-item select {
  flex-grow: 1;
  flex-shrink: 1;
  min-width: 50px;
  padding: 6px 10px;
  border: 1px solid #777;
  margin-right: 10px;
  border-radius: 4px;
  background-color: #555;
  color: #f0f0f0;
  font-size: 0.9em;
}
.tweak-text-item select { cursor: pointer; }
.tweak-divider { border-color: #4a4a4a; border-top-width: 1px; margin: 20px 0; }
#tweak-modal-scrollable-content {
  max-height: calc(80vh - 200px);
  overflow-y: auto;
  overflow-x: hidden;
  padding-right: 15px;
  margin-right: -15px;
}
#tweak-modal-scrollable-content::-webkit-scrollbar { width: 8px; }
#tweak-modal-scrollable-content::-webkit-scrollbar-track { background: #444; border-radius: 4px; }
#tweak-modal-scrollable-content::-webkit-scrollbar-thumb {
  background-color: #888;
  border-radius: 4px;
  border: 2px solid #444;
}
#tweak-modal-scrollable-content::-webkit-scrollbar-thumb:hover { background-color: #aaa; }
";
