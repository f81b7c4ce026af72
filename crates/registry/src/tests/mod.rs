//! Registry integration tests: model-checked properties across registry flavours.
