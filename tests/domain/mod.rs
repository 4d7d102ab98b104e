mod inference_steps_test;
